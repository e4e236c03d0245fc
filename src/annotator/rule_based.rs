//! Regex/gazetteer annotator
//!
//! Portable stand-in for platform data detectors and NL taggers. Detection is
//! deliberately conservative: a missed span costs a little recall downstream,
//! a false span pollutes every extractor that consumes it.

use super::{DataDetection, DataDetectionKind, EntitySpan, EntityTag, TextAnnotator};
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(
        r"(?:\+?1[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}(?:\s*(?:ext\.?|x)\s*\d{1,5})?"
    )
    .unwrap();
    static ref URL_RE: Regex =
        Regex::new(r"(?:https?://|www\.)[A-Za-z0-9][A-Za-z0-9./_%~#?&=+:\-]*").unwrap();
    static ref DATE_SLASH_RE: Regex = Regex::new(r"\b\d{1,2}/\d{1,2}/\d{2,4}\b").unwrap();
    static ref DATE_ISO_RE: Regex = Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap();
    static ref DATE_MONTH_RE: Regex = Regex::new(
        r"\b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\.?\s+\d{1,2},?\s+\d{4}\b"
    )
    .unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap();
    static ref STREET_RE: Regex = Regex::new(
        r"(?i)\b\d+\s+[A-Za-z0-9. ]+?\b(?:street|st|avenue|ave|road|rd|boulevard|blvd|drive|dr|lane|ln|way|court|ct|place|pl|suite|ste)\b\.?"
    )
    .unwrap();
    static ref CITY_STATE_RE: Regex =
        Regex::new(r"\b([A-Z][a-z]+(?:\s[A-Z][a-z]+)?),\s*([A-Z]{2})\b").unwrap();
    // Tokens join on horizontal whitespace only; an entity never spans lines.
    static ref ORG_RE: Regex = Regex::new(
        r"\b[A-Z][A-Za-z0-9&'\-]*(?:[ \t]+[A-Z][A-Za-z0-9&'\-]*){0,4}[ \t]+(?:Inc|LLC|Corp|Corporation|Ltd|Limited|Co|Company|Group|Solutions|Services|Technologies|Systems|Associates|Partners|Enterprises|Industries|Consulting|Agency|Studio)\.?\b"
    )
    .unwrap();
    static ref PERSON_RE: Regex =
        Regex::new(r"\b[A-Z][a-z]+[ \t]+(?:[A-Z]\.[ \t]+)?[A-Z][a-z]+\b").unwrap();
    static ref HONORIFIC_PERSON_RE: Regex =
        Regex::new(r"\b(?:Dr|Mr|Mrs|Ms|Prof)\.?[ \t]+[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)?\b").unwrap();

    /// Lowercased words that disqualify a capitalized bigram from being a
    /// person name (role words, company suffixes, calendar words, sentence
    /// starters, place prefixes).
    static ref NON_PERSON_WORDS: HashSet<&'static str> = [
        "senior", "junior", "chief", "executive", "officer", "president", "vice", "director",
        "manager", "engineer", "developer", "designer", "consultant", "analyst", "specialist",
        "coordinator", "founder", "partner", "principal", "owner", "chairman", "ceo", "cto",
        "cfo", "coo", "vp", "account", "sales", "marketing", "operations", "product", "project",
        "inc", "llc", "corp", "corporation", "ltd", "limited", "co", "company", "group",
        "solutions", "services", "technologies", "systems", "associates", "partners",
        "enterprises", "industries", "consulting", "agency", "studio",
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "monday", "tuesday", "wednesday", "thursday",
        "friday", "saturday", "sunday",
        "the", "this", "that", "these", "those", "dear", "best", "kind", "thank", "thanks",
        "please", "sincerely", "regards", "street", "avenue", "road", "suite", "notice",
        "important", "attention", "north", "south", "east", "west", "new", "san", "los", "las",
        "united", "states",
    ]
    .into_iter()
    .collect();

    /// Small gazetteer of well-known city names.
    static ref KNOWN_PLACES: Vec<&'static str> = vec![
        "New York", "San Francisco", "Los Angeles", "Chicago", "Boston", "Seattle", "Austin",
        "Denver", "Miami", "Portland", "Atlanta", "Dallas", "Houston", "Philadelphia",
        "London", "Paris", "Berlin", "Madrid", "Tokyo", "Toronto", "Sydney",
    ];
}

/// Portable annotator built on regexes and small gazetteers.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedAnnotator;

impl RuleBasedAnnotator {
    pub fn new() -> Self {
        Self
    }

    fn detect_addresses(&self, text: &str, out: &mut Vec<DataDetection>) {
        let mut offset = 0usize;
        let mut consumed_until = 0usize;
        let lines: Vec<&str> = text.split('\n').collect();
        let mut line_starts = Vec::with_capacity(lines.len());
        for line in &lines {
            line_starts.push(offset);
            offset += line.len() + 1;
        }

        for (i, line) in lines.iter().enumerate() {
            let start = line_starts[i];
            if start < consumed_until {
                continue;
            }
            let is_street = STREET_RE.is_match(line);
            let is_city_line = CITY_STATE_RE.is_match(line) || ZIP_RE.is_match(line);
            if !is_street && !(is_city_line && CITY_STATE_RE.is_match(line)) {
                continue;
            }
            // A street line pulls in up to two following city/ZIP lines.
            let mut end_line = i;
            if is_street {
                for j in (i + 1)..lines.len().min(i + 3) {
                    if CITY_STATE_RE.is_match(lines[j]) || ZIP_RE.is_match(lines[j]) {
                        end_line = j;
                    } else {
                        break;
                    }
                }
            }
            let end = line_starts[end_line] + lines[end_line].len();
            let matched = &text[start..end];
            out.push(DataDetection {
                kind: DataDetectionKind::Address,
                range: start..end,
                text: matched.to_string(),
            });
            consumed_until = end;
        }
    }
}

impl TextAnnotator for RuleBasedAnnotator {
    fn detect_data(&self, text: &str) -> Result<Vec<DataDetection>> {
        let mut out = Vec::new();
        if text.trim().is_empty() {
            return Ok(out);
        }
        for m in PHONE_RE.find_iter(text) {
            out.push(DataDetection {
                kind: DataDetectionKind::PhoneNumber,
                range: m.range(),
                text: m.as_str().to_string(),
            });
        }
        for m in URL_RE.find_iter(text) {
            let trimmed = m.as_str().trim_end_matches(['.', ',', ')', ';']);
            out.push(DataDetection {
                kind: DataDetectionKind::Link,
                range: m.start()..m.start() + trimmed.len(),
                text: trimmed.to_string(),
            });
        }
        for re in [&*DATE_SLASH_RE, &*DATE_ISO_RE, &*DATE_MONTH_RE] {
            for m in re.find_iter(text) {
                out.push(DataDetection {
                    kind: DataDetectionKind::Date,
                    range: m.range(),
                    text: m.as_str().to_string(),
                });
            }
        }
        self.detect_addresses(text, &mut out);
        Ok(out)
    }

    fn tag_entities(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let mut out = Vec::new();
        if text.trim().is_empty() {
            return Ok(out);
        }

        let mut org_ranges: Vec<Range<usize>> = Vec::new();
        for m in ORG_RE.find_iter(text) {
            org_ranges.push(m.range());
            out.push(EntitySpan {
                tag: EntityTag::Organization,
                range: m.range(),
                text: m.as_str().trim_end_matches('.').to_string(),
            });
        }

        let mut place_ranges: Vec<Range<usize>> = Vec::new();
        for caps in CITY_STATE_RE.captures_iter(text) {
            let city = caps.get(1).expect("city group");
            place_ranges.push(city.range());
            out.push(EntitySpan {
                tag: EntityTag::Place,
                range: city.range(),
                text: city.as_str().to_string(),
            });
        }
        for place in KNOWN_PLACES.iter() {
            for (start, matched) in text.match_indices(place) {
                let range = start..start + matched.len();
                if place_ranges.iter().any(|r| ranges_overlap(r, &range)) {
                    continue;
                }
                place_ranges.push(range.clone());
                out.push(EntitySpan {
                    tag: EntityTag::Place,
                    range,
                    text: matched.to_string(),
                });
            }
        }

        for re in [&*HONORIFIC_PERSON_RE, &*PERSON_RE] {
            for m in re.find_iter(text) {
                let range = m.range();
                if org_ranges.iter().any(|r| ranges_overlap(r, &range))
                    || place_ranges.iter().any(|r| ranges_overlap(r, &range))
                {
                    continue;
                }
                let disqualified = m
                    .as_str()
                    .split_whitespace()
                    .any(|w| NON_PERSON_WORDS.contains(w.trim_end_matches('.').to_lowercase().as_str()));
                if disqualified {
                    continue;
                }
                // Honorific matches subsume plain matches on the same span.
                if out
                    .iter()
                    .any(|e| e.tag == EntityTag::Person && ranges_overlap(&e.range, &range))
                {
                    continue;
                }
                out.push(EntitySpan {
                    tag: EntityTag::Person,
                    range,
                    text: m.as_str().to_string(),
                });
            }
        }

        Ok(out)
    }
}

fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_phone() {
        let annotator = RuleBasedAnnotator::new();
        let detections = annotator.detect_data("Call (415) 555-2671 today").unwrap();
        let phones: Vec<_> = detections
            .iter()
            .filter(|d| d.kind == DataDetectionKind::PhoneNumber)
            .collect();
        assert_eq!(phones.len(), 1);
        assert_eq!(phones[0].text, "(415) 555-2671");
    }

    #[test]
    fn test_detects_url_without_trailing_punctuation() {
        let annotator = RuleBasedAnnotator::new();
        let detections = annotator
            .detect_data("Visit www.example.com. Thanks!")
            .unwrap();
        let links: Vec<_> = detections
            .iter()
            .filter(|d| d.kind == DataDetectionKind::Link)
            .collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "www.example.com");
    }

    #[test]
    fn test_detects_dates_in_multiple_formats() {
        let annotator = RuleBasedAnnotator::new();
        let detections = annotator
            .detect_data("Due 12/31/2024 or January 5, 2025 or 2024-06-30")
            .unwrap();
        let dates: Vec<_> = detections
            .iter()
            .filter(|d| d.kind == DataDetectionKind::Date)
            .collect();
        assert_eq!(dates.len(), 3);
    }

    #[test]
    fn test_detects_multi_line_address() {
        let annotator = RuleBasedAnnotator::new();
        let detections = annotator
            .detect_data("Acme Corp\n123 Main Street\nSpringfield, IL 62704")
            .unwrap();
        let addresses: Vec<_> = detections
            .iter()
            .filter(|d| d.kind == DataDetectionKind::Address)
            .collect();
        assert_eq!(addresses.len(), 1);
        assert!(addresses[0].text.contains("123 Main Street"));
        assert!(addresses[0].text.contains("62704"));
    }

    #[test]
    fn test_tags_person_and_organization() {
        let annotator = RuleBasedAnnotator::new();
        let spans = annotator
            .tag_entities("John Smith\nSenior Director\nAcme Corp")
            .unwrap();
        assert!(spans
            .iter()
            .any(|s| s.tag == EntityTag::Person && s.text == "John Smith"));
        assert!(spans
            .iter()
            .any(|s| s.tag == EntityTag::Organization && s.text == "Acme Corp"));
        // Role line must not be tagged as a person
        assert!(!spans
            .iter()
            .any(|s| s.tag == EntityTag::Person && s.text.contains("Director")));
    }

    #[test]
    fn test_entity_spans_stay_within_one_line() {
        let annotator = RuleBasedAnnotator::new();
        // Capitalized lines stacked above a company suffix must not fuse
        // into one multi-line organization span.
        let spans = annotator
            .tag_entities("John Smith\nSenior Director\nAcme Corp\n(555) 123-4567")
            .unwrap();
        assert!(spans.iter().all(|s| !s.text.contains('\n')));
        assert!(spans
            .iter()
            .any(|s| s.tag == EntityTag::Organization && s.text == "Acme Corp"));
        assert!(spans
            .iter()
            .any(|s| s.tag == EntityTag::Person && s.text == "John Smith"));
    }

    #[test]
    fn test_tags_place_from_city_state() {
        let annotator = RuleBasedAnnotator::new();
        let spans = annotator.tag_entities("Office in Springfield, IL today").unwrap();
        assert!(spans
            .iter()
            .any(|s| s.tag == EntityTag::Place && s.text == "Springfield"));
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let annotator = RuleBasedAnnotator::new();
        assert!(annotator.detect_data("   \n  ").unwrap().is_empty());
        assert!(annotator.tag_entities("").unwrap().is_empty());
    }
}
