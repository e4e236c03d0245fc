//! Contact information extraction
//!
//! Runs the annotator's data-detection pass first, then supplementary
//! hand-written patterns, merging while skipping duplicates the detector
//! already captured. Each item is normalized and given a confidence that is
//! baselined per category and boosted when the surrounding context contains
//! category-relevant keywords.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::contact::ContactInfoExtractor;
//!
//! let extractor = ContactInfoExtractor::new();
//! let info = extractor.extract("Call me at (415) 555-2671 or email jane@example.com");
//! assert_eq!(info.phone_numbers[0].formatted, "(415) 555-2671");
//! assert_eq!(info.email_addresses[0].domain, "example.com");
//! ```

use crate::annotator::{DataDetectionKind, RuleBasedAnnotator, TextAnnotator};
use crate::model::{
    ContactInfo, DateReference, EmailAddress, PhoneNumber, PhoneType, PostalAddress, UrlReference,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

lazy_static! {
    /// Supplementary phone pattern: optional country code, area code,
    /// exchange, line, optional extension.
    static ref SUPP_PHONE_RE: Regex = Regex::new(
        r"(?:\+?1[\s.\-]?)?\(?\d{3}\)?[\s.\-]?\d{3}[\s.\-]?\d{4}(?:\s*(?:ext\.?|x)\s*\d{1,5})?"
    )
    .unwrap();
    /// Supplementary email pattern: `local@domain.tld`.
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap();
    static ref ZIP_RE: Regex = Regex::new(r"\b(\d{5}(?:-\d{4})?)\b").unwrap();
    static ref EXTENSION_RE: Regex = Regex::new(r"(?:ext\.?|x)\s*\d{1,5}\s*$").unwrap();
}

/// Email domains that earn a provider confidence boost.
const WELL_KNOWN_PROVIDERS: [&str; 7] = [
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "aol.com",
    "protonmail.com",
];

/// Baseline confidences per category, overridable for tuning.
#[derive(Debug, Clone)]
pub struct ContactConfidence {
    pub phone_base: f64,
    pub email_base: f64,
    pub address_base: f64,
    pub url_base: f64,
    pub date_base: f64,
}

impl Default for ContactConfidence {
    fn default() -> Self {
        Self {
            phone_base: 0.7,
            email_base: 0.8,
            address_base: 0.6,
            url_base: 0.8,
            date_base: 0.7,
        }
    }
}

/// Detects phone numbers, emails, postal addresses, URLs, and dates.
///
/// Pure with respect to shared state; never fails — absence of a category
/// yields an empty list.
pub struct ContactInfoExtractor {
    annotator: Arc<dyn TextAnnotator>,
    confidence: ContactConfidence,
}

impl Default for ContactInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactInfoExtractor {
    pub fn new() -> Self {
        Self::with_annotator(Arc::new(RuleBasedAnnotator::new()))
    }

    pub fn with_annotator(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self {
            annotator,
            confidence: ContactConfidence::default(),
        }
    }

    /// Extracts all contact categories from raw text.
    pub fn extract(&self, text: &str) -> ContactInfo {
        let mut info = ContactInfo::default();
        if text.trim().is_empty() {
            return info;
        }

        let detections = self.annotator.detect_data(text).unwrap_or_default();

        let mut seen_phone_digits: HashSet<String> = HashSet::new();
        let mut seen_urls: HashSet<String> = HashSet::new();
        let mut seen_dates: HashSet<String> = HashSet::new();

        for detection in &detections {
            match detection.kind {
                DataDetectionKind::PhoneNumber => {
                    let digits = digit_key(&detection.text);
                    if digits.len() >= 10 && seen_phone_digits.insert(digits) {
                        info.phone_numbers.push(self.build_phone(
                            &detection.text,
                            text,
                            &detection.range,
                        ));
                    }
                }
                DataDetectionKind::Link => {
                    let url = normalize_url(&detection.text);
                    if seen_urls.insert(url.clone()) {
                        info.urls
                            .push(self.build_url(&detection.text, url, text, &detection.range));
                    }
                }
                DataDetectionKind::Address => {
                    info.addresses
                        .push(self.build_address(&detection.text, text, &detection.range));
                }
                DataDetectionKind::Date => {
                    if seen_dates.insert(detection.text.clone()) {
                        info.dates
                            .push(self.build_date(&detection.text, text, &detection.range));
                    }
                }
            }
        }

        // Supplementary pass: hand-written patterns catch what the detector
        // missed; duplicates already captured above are skipped.
        for m in SUPP_PHONE_RE.find_iter(text) {
            let digits = digit_key(m.as_str());
            if digits.len() >= 10 && seen_phone_digits.insert(digits) {
                info.phone_numbers
                    .push(self.build_phone(m.as_str(), text, &m.range()));
            }
        }
        let mut seen_emails: HashSet<String> = HashSet::new();
        for m in EMAIL_RE.find_iter(text) {
            let address = m.as_str().to_lowercase();
            if seen_emails.insert(address.clone()) {
                info.email_addresses
                    .push(self.build_email(m.as_str(), address, text, &m.range()));
            }
        }

        tracing::debug!(
            phones = info.phone_numbers.len(),
            emails = info.email_addresses.len(),
            addresses = info.addresses.len(),
            urls = info.urls.len(),
            dates = info.dates.len(),
            "contact extraction complete"
        );
        info
    }

    fn build_phone(&self, raw: &str, text: &str, range: &Range<usize>) -> PhoneNumber {
        let context = context_window(text, range, 25);
        let mut confidence = self.confidence.phone_base;
        if ["phone", "call", "tel", "mobile", "cell", "fax", "office", "direct"]
            .iter()
            .any(|k| context.contains(k))
        {
            confidence += 0.15;
        }
        PhoneNumber {
            raw: raw.trim().to_string(),
            formatted: format_phone(raw),
            phone_type: classify_phone_type(&context),
            confidence: clamp01(confidence),
        }
    }

    fn build_email(
        &self,
        raw: &str,
        address: String,
        text: &str,
        range: &Range<usize>,
    ) -> EmailAddress {
        let context = context_window(text, range, 25);
        let domain = address
            .rsplit_once('@')
            .map(|(_, d)| d.to_string())
            .unwrap_or_default();
        let is_valid = raw.matches('@').count() == 1 && domain.contains('.');
        let mut confidence = self.confidence.email_base;
        if ["email", "e-mail", "mail", "contact"]
            .iter()
            .any(|k| context.contains(k))
        {
            confidence += 0.1;
        }
        if WELL_KNOWN_PROVIDERS.contains(&domain.as_str()) {
            confidence += 0.1;
        }
        EmailAddress {
            raw: raw.to_string(),
            address,
            domain,
            is_valid,
            confidence: clamp01(confidence),
        }
    }

    fn build_address(&self, raw: &str, text: &str, range: &Range<usize>) -> PostalAddress {
        let context = context_window(text, range, 30);
        let mut confidence = self.confidence.address_base;
        if ["address", "located", "location", "suite", "office"]
            .iter()
            .any(|k| context.contains(k))
        {
            confidence += 0.2;
        }
        let (street, city, state, postal_code) = parse_address_parts(raw);
        PostalAddress {
            raw: raw.to_string(),
            street,
            city,
            state,
            postal_code,
            confidence: clamp01(confidence),
        }
    }

    fn build_url(
        &self,
        raw: &str,
        url: String,
        text: &str,
        range: &Range<usize>,
    ) -> UrlReference {
        let context = context_window(text, range, 25);
        let mut confidence = self.confidence.url_base;
        if ["website", "web", "visit", "site", "online"]
            .iter()
            .any(|k| context.contains(k))
        {
            confidence += 0.1;
        }
        UrlReference {
            raw: raw.to_string(),
            domain: url_domain(&url),
            url,
            confidence: clamp01(confidence),
        }
    }

    fn build_date(&self, raw: &str, text: &str, range: &Range<usize>) -> DateReference {
        let context = context_window(text, range, 25);
        let mut confidence = self.confidence.date_base;
        if ["date", "dated", "due", "expires", "valid", "scheduled"]
            .iter()
            .any(|k| context.contains(k))
        {
            confidence += 0.1;
        }
        DateReference {
            raw: raw.to_string(),
            parsed: parse_date(raw),
            confidence: clamp01(confidence),
        }
    }
}

/// Lowercased text in a window around the match, for keyword boosting.
fn context_window(text: &str, range: &Range<usize>, pad: usize) -> String {
    let start = range.start.saturating_sub(pad);
    let end = (range.end + pad).min(text.len());
    // Snap to char boundaries
    let start = (0..=start).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
    let end = (end..=text.len()).find(|&i| text.is_char_boundary(i)).unwrap_or(text.len());
    text[start..end].to_lowercase()
}

fn digit_key(raw: &str) -> String {
    let without_ext = EXTENSION_RE.replace(raw.trim(), "");
    without_ext.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Groups digits into a display form keyed on digit count.
fn format_phone(raw: &str) -> String {
    let digits = digit_key(raw);
    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        11 if digits.starts_with('1') => format!(
            "+1 ({}) {}-{}",
            &digits[1..4],
            &digits[4..7],
            &digits[7..11]
        ),
        _ => raw.trim().to_string(),
    }
}

fn classify_phone_type(context: &str) -> PhoneType {
    if context.contains("cell") || context.contains("mobile") {
        PhoneType::Mobile
    } else if context.contains("fax") {
        PhoneType::Fax
    } else if context.contains("office") || context.contains("work") || context.contains("direct")
    {
        PhoneType::Work
    } else if context.contains("home") {
        PhoneType::Home
    } else if context.contains("main") {
        PhoneType::Main
    } else {
        PhoneType::Other
    }
}

/// Heuristic split of a raw address: first line is the street, the last line
/// is searched for a ZIP, and the text before the ZIP splits on comma into
/// city and state.
fn parse_address_parts(
    raw: &str,
) -> (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
) {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        return (None, None, None, None);
    }
    let street = lines
        .first()
        .filter(|l| l.chars().any(|c| c.is_ascii_digit()))
        .map(|l| l.to_string());

    let (city, state, postal_code) = match lines.last() {
        Some(last) if lines.len() > 1 || ZIP_RE.is_match(last) => {
            if let Some(caps) = ZIP_RE.captures(last) {
                let zip_match = caps.get(1).expect("zip group");
                let before = last[..zip_match.start()].trim_end_matches([' ', ',']);
                let mut parts = before.split(',').map(str::trim).filter(|p| !p.is_empty());
                (
                    parts.next().map(str::to_string),
                    parts.next().map(str::to_string),
                    Some(zip_match.as_str().to_string()),
                )
            } else {
                let mut parts = last.split(',').map(str::trim).filter(|p| !p.is_empty());
                (
                    parts.next().map(str::to_string),
                    parts.next().map(str::to_string),
                    None,
                )
            }
        }
        _ => (None, None, None),
    };
    (street, city, state, postal_code)
}

fn normalize_url(raw: &str) -> String {
    if raw.starts_with("www.") {
        format!("https://{raw}")
    } else {
        raw.to_string()
    }
}

fn url_domain(url: &str) -> Option<String> {
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = stripped.split(['/', '?', '#']).next()?;
    let host = host.trim_start_matches("www.");
    if host.contains('.') {
        Some(host.to_string())
    } else {
        None
    }
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = raw.replace('.', "");
    const FORMATS: [&str; 7] = [
        "%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d", "%B %d, %Y", "%B %d %Y", "%b %d, %Y", "%b %d %Y",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cleaned.trim(), fmt).ok())
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
