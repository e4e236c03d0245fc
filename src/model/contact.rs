//! Contact information types
//!
//! Each detected item keeps its raw matched text alongside a normalized form
//! and a calibrated confidence, so downstream consumers can choose between
//! fidelity and presentation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// All contact details found in a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone_numbers: Vec<PhoneNumber>,
    pub email_addresses: Vec<EmailAddress>,
    pub addresses: Vec<PostalAddress>,
    pub urls: Vec<UrlReference>,
    pub dates: Vec<DateReference>,
}

impl ContactInfo {
    /// True iff all five category lists are empty.
    pub fn is_empty(&self) -> bool {
        self.phone_numbers.is_empty()
            && self.email_addresses.is_empty()
            && self.addresses.is_empty()
            && self.urls.is_empty()
            && self.dates.is_empty()
    }

    /// Number of distinct contact methods present (phone, email, address).
    ///
    /// URLs and dates are supporting evidence, not contact methods.
    pub fn contact_method_count(&self) -> usize {
        usize::from(!self.phone_numbers.is_empty())
            + usize::from(!self.email_addresses.is_empty())
            + usize::from(!self.addresses.is_empty())
    }
}

/// Classification of a phone number derived from surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneType {
    Mobile,
    Work,
    Home,
    Fax,
    Main,
    Other,
}

/// A detected phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// Text exactly as matched in the document.
    pub raw: String,
    /// Grouped display form, e.g. `(415) 555-2671` or `+1 (415) 555-2671`.
    pub formatted: String,
    pub phone_type: PhoneType,
    pub confidence: f64,
}

/// A detected email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub raw: String,
    /// Lowercased address.
    pub address: String,
    /// Domain substring after `@`.
    pub domain: String,
    /// Structural validity (single `@`, dotted domain).
    pub is_valid: bool,
    pub confidence: f64,
}

/// A heuristically parsed postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostalAddress {
    pub raw: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub confidence: f64,
}

/// A detected URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlReference {
    pub raw: String,
    /// Normalized URL; bare `www.` hosts get an `https://` scheme.
    pub url: String,
    pub domain: Option<String>,
    pub confidence: f64,
}

/// A detected date mention.
///
/// `parsed` is populated when the raw text matches one of the known formats;
/// an unparseable raw keeps `None` since the mention itself is still evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateReference {
    pub raw: String,
    pub parsed: Option<NaiveDate>,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_info_is_empty() {
        let info = ContactInfo::default();
        assert!(info.is_empty());
    }

    #[test]
    fn test_contact_info_not_empty_with_one_item() {
        let mut info = ContactInfo::default();
        info.urls.push(UrlReference {
            raw: "www.example.com".to_string(),
            url: "https://www.example.com".to_string(),
            domain: Some("example.com".to_string()),
            confidence: 0.8,
        });
        assert!(!info.is_empty());
        // URLs do not count as a contact method
        assert_eq!(info.contact_method_count(), 0);
    }

    #[test]
    fn test_contact_method_count() {
        let mut info = ContactInfo::default();
        info.phone_numbers.push(PhoneNumber {
            raw: "555-123-4567".to_string(),
            formatted: "(555) 123-4567".to_string(),
            phone_type: PhoneType::Other,
            confidence: 0.7,
        });
        info.email_addresses.push(EmailAddress {
            raw: "a@b.com".to_string(),
            address: "a@b.com".to_string(),
            domain: "b.com".to_string(),
            is_valid: true,
            confidence: 0.8,
        });
        assert_eq!(info.contact_method_count(), 2);
    }
}
