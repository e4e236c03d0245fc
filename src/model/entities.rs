//! Named entity and currency types

use super::contact::DateReference;
use serde::{Deserialize, Serialize};

/// A monetary amount detected in the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyReference {
    /// Text exactly as matched, e.g. `$1,234.50`.
    pub raw: String,
    pub amount: f64,
    /// ISO-ish code derived from the symbol or suffix: USD, EUR, GBP.
    pub currency_code: String,
}

/// Entities recognized across the document.
///
/// The string lists are deduplicated and keep insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub people: Vec<String>,
    pub places: Vec<String>,
    pub organizations: Vec<String>,
    pub dates: Vec<DateReference>,
    pub currencies: Vec<CurrencyReference>,
    pub products: Vec<String>,
    pub confidence: f64,
}

impl ExtractedEntities {
    /// True iff nothing at all was recognized.
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
            && self.places.is_empty()
            && self.organizations.is_empty()
            && self.dates.is_empty()
            && self.currencies.is_empty()
            && self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ExtractedEntities::default().is_empty());
    }

    #[test]
    fn test_not_empty_with_currency() {
        let mut entities = ExtractedEntities::default();
        entities.currencies.push(CurrencyReference {
            raw: "$5.00".to_string(),
            amount: 5.0,
            currency_code: "USD".to_string(),
        });
        assert!(!entities.is_empty());
    }
}
