//! Business card detection and field extraction
//!
//! Multi-factor heuristic gate deciding "is this a business card", followed
//! by name/title/company/social extraction. Detection is strict: every gate
//! must pass and a weighted evidence score must reach the threshold before a
//! card is emitted; failing any gate returns `None`, never an error.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::business_card::BusinessCardProcessor;
//!
//! let processor = BusinessCardProcessor::new();
//! let card = processor
//!     .detect("John Smith\nSenior Director\nAcme Corp\n(555) 123-4567\njohn@acme.com", None)
//!     .unwrap();
//! assert_eq!(card.name.unwrap().full_name, "John Smith");
//! assert_eq!(card.company.as_deref(), Some("Acme Corp"));
//! ```

mod name;

use crate::annotator::{RuleBasedAnnotator, TextAnnotator};
use crate::contact::ContactInfoExtractor;
use crate::model::{BusinessCardData, ContactInfo, SocialMediaInfo, SocialPlatform};
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    /// Business title keywords, matched as whole words.
    pub(crate) static ref TITLE_RE: Regex = Regex::new(
        r"(?i)\b(?:ceo|cto|cfo|coo|vice president|president|director|manager|vp|founder|co-founder|partner|principal|owner|chairman|officer|engineer|developer|designer|architect|consultant|analyst|specialist|coordinator|executive|administrator|supervisor)\b"
    )
    .unwrap();
    /// Company-form indicators, matched as whole words.
    pub(crate) static ref COMPANY_RE: Regex = Regex::new(
        r"(?i)\b(?:inc|llc|corp|corporation|company|co|ltd|limited|group|solutions|services|technologies|systems|associates|partners|enterprises|industries|consulting|agency|studio|labs|ventures)\b"
    )
    .unwrap();
    static ref HANDLE_RE: Regex = Regex::new(r"(?:^|[\s:])@([A-Za-z0-9_]{2,30})\b").unwrap();
    static ref SOCIAL_URL_RE: Regex = Regex::new(
        r"(?i)\b(linkedin\.com/(?:in|company)/|twitter\.com/|x\.com/|github\.com/|instagram\.com/|facebook\.com/)([A-Za-z0-9_.\-]+)"
    )
    .unwrap();
}

/// Gating thresholds for card classification. The defaults are empirically
/// tuned and pinned by tests; override rather than re-derive.
#[derive(Debug, Clone)]
pub struct CardThresholds {
    /// Minimum distinct contact methods (phone/email/address) required.
    pub min_contact_methods: usize,
    /// Minimum weighted evidence score.
    pub min_score: u32,
    /// Cards are terse; more words than this rejects outright.
    pub max_words: usize,
    /// Word counts in this inclusive range earn a bonus point.
    pub word_bonus_range: (usize, usize),
    /// Line counts in this inclusive range earn a bonus point.
    pub line_bonus_range: (usize, usize),
}

impl Default for CardThresholds {
    fn default() -> Self {
        Self {
            min_contact_methods: 2,
            min_score: 10,
            max_words: 100,
            word_bonus_range: (15, 80),
            line_bonus_range: (3, 15),
        }
    }
}

/// Detects business cards and extracts their identity fields.
pub struct BusinessCardProcessor {
    annotator: Arc<dyn TextAnnotator>,
    contact_extractor: ContactInfoExtractor,
    thresholds: CardThresholds,
}

impl Default for BusinessCardProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BusinessCardProcessor {
    pub fn new() -> Self {
        Self::with_annotator(Arc::new(RuleBasedAnnotator::new()))
    }

    pub fn with_annotator(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self {
            contact_extractor: ContactInfoExtractor::with_annotator(annotator.clone()),
            annotator,
            thresholds: CardThresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: CardThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Decides whether the text is a business card and, if so, extracts it.
    ///
    /// A precomputed `ContactInfo` may be supplied to skip the duplicate
    /// extraction pass; `None` runs it internally.
    pub fn detect(
        &self,
        text: &str,
        precomputed_contact: Option<&ContactInfo>,
    ) -> Option<BusinessCardData> {
        if text.trim().is_empty() {
            return None;
        }
        let owned;
        let contact = match precomputed_contact {
            Some(contact) => contact,
            None => {
                owned = self.contact_extractor.extract(text);
                &owned
            }
        };

        if contact.contact_method_count() < self.thresholds.min_contact_methods {
            tracing::debug!("card rejected: too few contact methods");
            return None;
        }
        let person = name::extract_person_name(text, self.annotator.as_ref())?;

        let has_title_keyword = TITLE_RE.is_match(text);
        let has_company_indicator = COMPANY_RE.is_match(text);
        if !has_title_keyword && !has_company_indicator {
            tracing::debug!("card rejected: no title or company evidence");
            return None;
        }

        let word_count = text.split_whitespace().count();
        if word_count > self.thresholds.max_words {
            tracing::debug!(word_count, "card rejected: too verbose");
            return None;
        }
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let score = self.score(
            contact,
            has_title_keyword,
            has_company_indicator,
            word_count,
            lines.len(),
        );
        if score < self.thresholds.min_score {
            tracing::debug!(score, "card rejected: below score threshold");
            return None;
        }

        let name_line = lines
            .iter()
            .position(|l| l.contains(person.full_name.as_str()));
        let title_line = self.find_title_line(&lines, name_line);
        let title = title_line.map(|i| lines[i].to_string());
        let company = self.find_company(&lines, name_line, title_line);
        let social_media = extract_social_media(text);

        let confidence = card_confidence(&person, &title, &company, contact);
        Some(BusinessCardData {
            name: Some(person),
            title,
            company,
            contact_info: contact.clone(),
            social_media,
            confidence,
        })
    }

    /// Weighted evidence tally; points pinned as contract by tests.
    fn score(
        &self,
        contact: &ContactInfo,
        has_title: bool,
        has_company: bool,
        word_count: usize,
        line_count: usize,
    ) -> u32 {
        let mut score = 0u32;
        if !contact.phone_numbers.is_empty() {
            score += 2;
        }
        if !contact.email_addresses.is_empty() {
            score += 2;
        }
        if !contact.addresses.is_empty() {
            score += 1;
        }
        if !contact.urls.is_empty() {
            score += 1;
        }
        if has_title {
            score += 2;
        }
        if has_company {
            score += 2;
        }
        // A name is required to reach this point.
        score += 3;
        let (w_lo, w_hi) = self.thresholds.word_bonus_range;
        if (w_lo..=w_hi).contains(&word_count) {
            score += 1;
        }
        let (l_lo, l_hi) = self.thresholds.line_bonus_range;
        if (l_lo..=l_hi).contains(&line_count) {
            score += 1;
        }
        score
    }

    /// The title sits on the name line itself or one of the two lines below;
    /// a keyword elsewhere (a footer, another person's role) does not count.
    fn find_title_line(&self, lines: &[&str], name_line: Option<usize>) -> Option<usize> {
        let start = name_line.unwrap_or(0);
        (start..lines.len().min(start + 3)).find(|&i| TITLE_RE.is_match(lines[i]))
    }

    /// Scans the remaining lines for a company indicator, falling back to
    /// the longest line that is not contact info.
    fn find_company(
        &self,
        lines: &[&str],
        name_line: Option<usize>,
        title_line: Option<usize>,
    ) -> Option<String> {
        let excluded =
            |i: usize| Some(i) == name_line || Some(i) == title_line;
        if let Some(line) = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| !excluded(*i))
            .find(|(_, l)| COMPANY_RE.is_match(l))
        {
            return Some(line.1.to_string());
        }
        lines
            .iter()
            .enumerate()
            .filter(|(i, l)| !excluded(*i) && !is_contact_line(l) && l.len() >= 3)
            .max_by_key(|(_, l)| l.len())
            .map(|(_, l)| l.to_string())
    }
}

fn is_contact_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    line.contains('@')
        || lower.contains("www")
        || lower.contains("http")
        || lower.contains(".com")
        || line.chars().filter(|c| c.is_ascii_digit()).count() >= 5
}

fn extract_social_media(text: &str) -> Vec<SocialMediaInfo> {
    let mut out = Vec::new();
    for caps in SOCIAL_URL_RE.captures_iter(text) {
        let host = caps.get(1).expect("host group").as_str().to_lowercase();
        let handle = caps.get(2).expect("handle group").as_str().to_string();
        let platform = if host.starts_with("linkedin") {
            SocialPlatform::LinkedIn
        } else if host.starts_with("twitter") || host.starts_with("x.com") {
            SocialPlatform::Twitter
        } else if host.starts_with("github") {
            SocialPlatform::GitHub
        } else if host.starts_with("instagram") {
            SocialPlatform::Instagram
        } else {
            SocialPlatform::Facebook
        };
        out.push(SocialMediaInfo {
            platform,
            url: Some(format!("https://{}{}", host, handle)),
            handle,
        });
    }
    for caps in HANDLE_RE.captures_iter(text) {
        let m = caps.get(1).expect("handle group");
        // An email's domain half also looks like a handle; skip those.
        if text[m.end()..].starts_with('.') {
            continue;
        }
        let handle = m.as_str().to_string();
        if out.iter().any(|s| s.handle == handle) {
            continue;
        }
        let lower = text.to_lowercase();
        let platform = if lower.contains("twitter") || lower.contains("x:") {
            SocialPlatform::Twitter
        } else if lower.contains("instagram") {
            SocialPlatform::Instagram
        } else if lower.contains("github") {
            SocialPlatform::GitHub
        } else {
            SocialPlatform::Other
        };
        out.push(SocialMediaInfo {
            platform,
            handle,
            url: None,
        });
    }
    out
}

/// Additive confidence over extracted fields, clamped to 1.0.
fn card_confidence(
    person: &crate::model::PersonName,
    title: &Option<String>,
    company: &Option<String>,
    contact: &ContactInfo,
) -> f64 {
    let mut confidence = 0.3;
    if person.has_full_parts() {
        confidence += 0.1;
    }
    if title.is_some() {
        confidence += 0.2;
    }
    if company.is_some() {
        confidence += 0.2;
    }
    let phones = contact.phone_numbers.len();
    if phones >= 1 {
        confidence += 0.1 + 0.05 * (phones - 1) as f64;
    }
    let emails = contact.email_addresses.len();
    if emails >= 1 {
        confidence += 0.1 + 0.05 * (emails - 1) as f64;
    }
    if !contact.addresses.is_empty() {
        confidence += 0.1;
    }
    confidence.clamp(0.0, 1.0)
}
