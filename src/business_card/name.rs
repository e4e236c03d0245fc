//! Person-name extraction cascade
//!
//! Strategies run in order, accepting the first success: named-entity spans,
//! the last three lines in reverse (cards often put the name at the bottom),
//! the first five lines, any line of mostly capitalized tokens, and finally
//! canonical name-shape regexes with non-name substring rejection.

use crate::annotator::{EntityTag, TextAnnotator};
use crate::model::PersonName;
use lazy_static::lazy_static;
use regex::Regex;

use super::{COMPANY_RE, TITLE_RE};

lazy_static! {
    /// Canonical name shapes tried as a last resort: "First Last",
    /// "First M. Last", "Last, First", ALL-CAPS pair, three tokens.
    static ref NAME_SHAPE_RES: Vec<Regex> = vec![
        Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+$").unwrap(),
        Regex::new(r"^[A-Z][a-z]+\s+[A-Z]\.\s+[A-Z][a-z]+$").unwrap(),
        Regex::new(r"^[A-Z][a-z]+,\s+[A-Z][a-z]+$").unwrap(),
        Regex::new(r"^[A-Z]{2,}\s+[A-Z]{2,}$").unwrap(),
        Regex::new(r"^[A-Z][a-z]+\s+[A-Z][a-z]+\s+[A-Z][a-z]+$").unwrap(),
    ];
}

const PREFIXES: [&str; 5] = ["dr", "mr", "mrs", "ms", "prof"];
const SUFFIXES: [&str; 8] = ["jr", "sr", "ii", "iii", "iv", "phd", "md", "esq"];

/// Obvious non-name fragments that disqualify a candidate line.
const NON_NAME_SUBSTRINGS: [&str; 8] =
    ["phone", "tel", "email", "fax", "www", ".com", "http", "@"];

pub(crate) fn extract_person_name(
    text: &str,
    annotator: &dyn TextAnnotator,
) -> Option<PersonName> {
    // (a) named-entity spans
    if let Ok(spans) = annotator.tag_entities(text) {
        if let Some(span) = spans
            .iter()
            .find(|s| s.tag == EntityTag::Person && s.text.split_whitespace().count() >= 2)
        {
            return Some(parse_person_name(&span.text));
        }
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    // (b) last three lines, bottom up
    for line in lines.iter().rev().take(3) {
        if line_is_name_candidate(line) {
            return Some(parse_person_name(line));
        }
    }
    // (c) first five lines, top down
    for line in lines.iter().take(5) {
        if line_is_name_candidate(line) {
            return Some(parse_person_name(line));
        }
    }
    // (d) any line of mostly capitalized alphabetic tokens
    for line in &lines {
        let words: Vec<&str> = line.split_whitespace().collect();
        if !(2..=4).contains(&words.len()) || contains_non_name_material(line) {
            continue;
        }
        let capitalized = words
            .iter()
            .filter(|w| is_capitalized_alpha_token(w))
            .count();
        if capitalized >= 2 {
            return Some(parse_person_name(line));
        }
    }
    // (e) canonical name shapes
    for line in &lines {
        if contains_non_name_material(line) {
            continue;
        }
        if NAME_SHAPE_RES.iter().any(|re| re.is_match(line)) {
            return Some(parse_person_name(line));
        }
    }
    None
}

fn contains_non_name_material(line: &str) -> bool {
    let lower = line.to_lowercase();
    NON_NAME_SUBSTRINGS.iter().any(|s| lower.contains(s))
        || TITLE_RE.is_match(line)
        || COMPANY_RE.is_match(line)
        || line.chars().any(|c| c.is_ascii_digit())
}

fn line_is_name_candidate(line: &str) -> bool {
    if contains_non_name_material(line) {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    (2..=4).contains(&words.len())
        && words.iter().all(|w| {
            let w = w.trim_end_matches([',', '.']);
            is_capitalized_alpha_token(w) || is_prefix_or_suffix(w)
        })
}

fn is_capitalized_alpha_token(word: &str) -> bool {
    let word = word.trim_end_matches([',', '.']);
    (2..=20).contains(&word.len())
        && word.chars().next().is_some_and(char::is_uppercase)
        && word.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
}

fn is_prefix_or_suffix(word: &str) -> bool {
    let lower = word.trim_end_matches(['.', ',']).to_lowercase();
    PREFIXES.contains(&lower.as_str()) || SUFFIXES.contains(&lower.as_str())
}

/// Decomposes a raw name into parts by stripping a recognized prefix and
/// suffix from the ends and treating the remainder as first + last name(s).
pub(crate) fn parse_person_name(raw: &str) -> PersonName {
    let mut tokens: Vec<String> = raw.split_whitespace().map(str::to_string).collect();

    let mut prefix = None;
    if let Some(first) = tokens.first() {
        if PREFIXES.contains(&first.trim_end_matches('.').to_lowercase().as_str()) {
            prefix = Some(tokens.remove(0));
        }
    }
    let mut suffix = None;
    if let Some(last) = tokens.last() {
        if SUFFIXES.contains(&last.trim_matches(['.', ','].as_ref()).to_lowercase().as_str()) {
            suffix = tokens.pop();
        }
    }

    // "Last, First" reorders into natural order.
    if tokens.len() == 2 && tokens[0].ends_with(',') {
        let last = tokens[0].trim_end_matches(',').to_string();
        tokens = vec![tokens[1].clone(), last];
    }

    let full_name = tokens.join(" ");
    let (first_name, last_name) = match tokens.len() {
        0 => (None, None),
        1 => (Some(tokens[0].clone()), None),
        _ => (Some(tokens[0].clone()), Some(tokens[1..].join(" "))),
    };

    PersonName {
        full_name,
        first_name,
        last_name,
        prefix,
        suffix,
    }
}
