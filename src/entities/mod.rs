//! Named-entity, date, currency, and product extraction
//!
//! Runs the annotator's entity tagger for people/places/organizations, the
//! data-detection pass for dates, and regex passes for monetary amounts and
//! keyword-adjacent product mentions. Absence of a category yields an empty
//! list, never an error.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::entities::EntityExtractor;
//!
//! let extractor = EntityExtractor::new();
//! let entities = extractor.extract("Invoice from Acme Corp for $1,250.00");
//! assert_eq!(entities.organizations, vec!["Acme Corp"]);
//! assert_eq!(entities.currencies[0].currency_code, "USD");
//! ```

use crate::annotator::{DataDetectionKind, EntityTag, RuleBasedAnnotator, TextAnnotator};
use crate::model::{CurrencyReference, DateReference, ExtractedEntities};
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;
use std::sync::Arc;

lazy_static! {
    /// Symbol-prefixed amounts: `$1,234.50`, `€ 9.99`, `£40`.
    static ref SYMBOL_AMOUNT_RE: Regex =
        Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d{1,2})?").unwrap();
    /// Code-suffixed amounts: `1250.00 USD`.
    static ref CODE_AMOUNT_RE: Regex =
        Regex::new(r"\b(\d[\d,]*(?:\.\d{1,2})?)\s?(USD|EUR|GBP)\b").unwrap();
    /// A capitalized phrase adjacent to a product-ish keyword.
    static ref PRODUCT_RE: Regex = Regex::new(
        r"(?i)\b(?:product|item|model)\b\s*[:#]?\s*([A-Z][A-Za-z0-9-]*(?:\s+[A-Z0-9][A-Za-z0-9-]*){0,2})"
    )
    .unwrap();
}

const DATE_BASE_CONFIDENCE: f64 = 0.7;

/// Extracts people, places, organizations, dates, currencies, and products.
pub struct EntityExtractor {
    annotator: Arc<dyn TextAnnotator>,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::with_annotator(Arc::new(RuleBasedAnnotator::new()))
    }

    pub fn with_annotator(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self { annotator }
    }

    /// Pure function over the text; an annotator failure degrades to the
    /// regex-only passes instead of surfacing an error.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        if text.trim().is_empty() {
            return ExtractedEntities::default();
        }
        let mut entities = ExtractedEntities::default();

        match self.annotator.tag_entities(text) {
            Ok(spans) => {
                for span in spans {
                    let bucket = match span.tag {
                        EntityTag::Person => &mut entities.people,
                        EntityTag::Place => &mut entities.places,
                        EntityTag::Organization => &mut entities.organizations,
                    };
                    if !bucket.contains(&span.text) {
                        bucket.push(span.text);
                    }
                }
            }
            Err(err) => tracing::warn!("entity tagging unavailable: {err}"),
        }

        entities.dates = self.extract_dates(text);
        entities.currencies = extract_currencies(text);
        entities.products = extract_products(text);
        entities.confidence = if entities.is_empty() { 0.3 } else { 0.7 };
        entities
    }

    fn extract_dates(&self, text: &str) -> Vec<DateReference> {
        let detections = match self.annotator.detect_data(text) {
            Ok(detections) => detections,
            Err(err) => {
                tracing::warn!("data detection unavailable: {err}");
                return Vec::new();
            }
        };
        detections
            .into_iter()
            .filter(|d| d.kind == DataDetectionKind::Date)
            .map(|d| DateReference {
                parsed: crate::contact::parse_date(&d.text),
                raw: d.text,
                confidence: DATE_BASE_CONFIDENCE,
            })
            .collect()
    }
}

fn extract_currencies(text: &str) -> Vec<CurrencyReference> {
    let mut out = Vec::new();
    let mut taken: Vec<Range<usize>> = Vec::new();

    for m in SYMBOL_AMOUNT_RE.find_iter(text) {
        let raw = m.as_str();
        let symbol = raw.chars().next().expect("non-empty match");
        let code = match symbol {
            '$' => "USD",
            '€' => "EUR",
            _ => "GBP",
        };
        if let Some(amount) = parse_amount(&raw[symbol.len_utf8()..]) {
            taken.push(m.range());
            out.push(CurrencyReference {
                raw: raw.to_string(),
                amount,
                currency_code: code.to_string(),
            });
        }
    }
    for caps in CODE_AMOUNT_RE.captures_iter(text) {
        let whole = caps.get(0).expect("whole match");
        // `$12.50 USD` already matched above; keep the symbol form.
        if taken.iter().any(|r| ranges_overlap(r, &whole.range())) {
            continue;
        }
        let amount_text = caps.get(1).expect("amount group").as_str();
        let code = caps.get(2).expect("code group").as_str();
        if let Some(amount) = parse_amount(amount_text) {
            out.push(CurrencyReference {
                raw: whole.as_str().to_string(),
                amount,
                currency_code: code.to_string(),
            });
        }
    }
    out
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().replace(',', "").parse::<f64>().ok()
}

fn extract_products(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for caps in PRODUCT_RE.captures_iter(text) {
        let name = caps.get(1).expect("name group").as_str().trim().to_string();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn ranges_overlap(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_people_and_organizations_deduplicated() {
        let extractor = EntityExtractor::new();
        let entities =
            extractor.extract("John Smith met John Smith at Acme Corp. Acme Corp agreed.");
        assert_eq!(entities.people, vec!["John Smith"]);
        assert_eq!(entities.organizations, vec!["Acme Corp"]);
    }

    #[test]
    fn test_symbol_currencies() {
        let entities = EntityExtractor::new().extract("Subtotal $1,234.50 plus €9.99 and £40");
        let codes: Vec<&str> = entities
            .currencies
            .iter()
            .map(|c| c.currency_code.as_str())
            .collect();
        assert_eq!(codes, vec!["USD", "EUR", "GBP"]);
        assert!((entities.currencies[0].amount - 1234.50).abs() < 1e-9);
        assert!((entities.currencies[2].amount - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_code_suffixed_currency() {
        let entities = EntityExtractor::new().extract("Wire 1250.00 USD by Friday");
        assert_eq!(entities.currencies.len(), 1);
        assert_eq!(entities.currencies[0].currency_code, "USD");
        assert!((entities.currencies[0].amount - 1250.0).abs() < 1e-9);
    }

    #[test]
    fn test_symbol_form_wins_over_code_suffix() {
        let entities = EntityExtractor::new().extract("Total: $12.50 USD");
        assert_eq!(entities.currencies.len(), 1);
        assert_eq!(entities.currencies[0].raw, "$12.50");
    }

    #[test]
    fn test_dates_parse_when_well_formed() {
        let entities = EntityExtractor::new().extract("Due 03/15/2026 at noon");
        assert_eq!(entities.dates.len(), 1);
        assert!(entities.dates[0].parsed.is_some());
    }

    #[test]
    fn test_products_from_keyword_adjacency() {
        let entities = EntityExtractor::new().extract("Model: Widget Pro 2000\nitem Gizmo");
        assert!(entities.products.contains(&"Widget Pro 2000".to_string()));
        assert!(entities.products.contains(&"Gizmo".to_string()));
    }

    #[test]
    fn test_confidence_levels() {
        let extractor = EntityExtractor::new();
        let found = extractor.extract("Paid $5.00");
        assert!((found.confidence - 0.7).abs() < 1e-9);
        let nothing = extractor.extract("nothing of note here");
        assert!((nothing.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input() {
        assert!(EntityExtractor::new().extract("  \n ").is_empty());
    }
}
