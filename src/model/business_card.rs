//! Business card identity types

use super::contact::ContactInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A person name decomposed into its recognized parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonName {
    pub full_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Honorific such as `Dr.` or `Ms.`.
    pub prefix: Option<String>,
    /// Trailing qualifier such as `Jr.`, `III`, `PhD`.
    pub suffix: Option<String>,
}

impl PersonName {
    /// True if both a first and a last name were recognized.
    pub fn has_full_parts(&self) -> bool {
        self.first_name.is_some() && self.last_name.is_some()
    }
}

/// Social media platforms recognized on cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialPlatform {
    LinkedIn,
    Twitter,
    Instagram,
    Facebook,
    GitHub,
    Other,
}

impl SocialPlatform {
    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::LinkedIn => "LinkedIn",
            SocialPlatform::Twitter => "Twitter",
            SocialPlatform::Instagram => "Instagram",
            SocialPlatform::Facebook => "Facebook",
            SocialPlatform::GitHub => "GitHub",
            SocialPlatform::Other => "Social",
        }
    }
}

/// A social media handle or profile URL found on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMediaInfo {
    pub platform: SocialPlatform,
    pub handle: String,
    pub url: Option<String>,
}

/// Identity extracted from a document classified as a business card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessCardData {
    pub name: Option<PersonName>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub contact_info: ContactInfo,
    pub social_media: Vec<SocialMediaInfo>,
    pub confidence: f64,
}

impl BusinessCardData {
    /// A card is complete when it identifies a person, their role or
    /// employer, and at least one way to reach them.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && (self.title.is_some() || self.company.is_some())
            && (!self.contact_info.phone_numbers.is_empty()
                || !self.contact_info.email_addresses.is_empty())
    }

    /// Flattens the card into a string-keyed record for CRM-style export.
    ///
    /// Only present fields appear; multi-valued fields are numbered
    /// (`phone_1`, `phone_2`, ...).
    pub fn to_record(&self) -> BTreeMap<String, String> {
        let mut record = BTreeMap::new();
        if let Some(name) = &self.name {
            record.insert("name".to_string(), name.full_name.clone());
            if let Some(first) = &name.first_name {
                record.insert("first_name".to_string(), first.clone());
            }
            if let Some(last) = &name.last_name {
                record.insert("last_name".to_string(), last.clone());
            }
        }
        if let Some(title) = &self.title {
            record.insert("title".to_string(), title.clone());
        }
        if let Some(company) = &self.company {
            record.insert("company".to_string(), company.clone());
        }
        for (i, phone) in self.contact_info.phone_numbers.iter().enumerate() {
            record.insert(format!("phone_{}", i + 1), phone.formatted.clone());
        }
        for (i, email) in self.contact_info.email_addresses.iter().enumerate() {
            record.insert(format!("email_{}", i + 1), email.address.clone());
        }
        for (i, address) in self.contact_info.addresses.iter().enumerate() {
            record.insert(format!("address_{}", i + 1), address.raw.clone());
        }
        for (i, url) in self.contact_info.urls.iter().enumerate() {
            record.insert(format!("url_{}", i + 1), url.url.clone());
        }
        for social in &self.social_media {
            record.insert(
                social.platform.label().to_lowercase(),
                social.handle.clone(),
            );
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmailAddress, PhoneNumber, PhoneType};

    fn sample_card() -> BusinessCardData {
        let mut contact_info = ContactInfo::default();
        contact_info.phone_numbers.push(PhoneNumber {
            raw: "555-123-4567".to_string(),
            formatted: "(555) 123-4567".to_string(),
            phone_type: PhoneType::Work,
            confidence: 0.7,
        });
        contact_info.email_addresses.push(EmailAddress {
            raw: "jane@corp.com".to_string(),
            address: "jane@corp.com".to_string(),
            domain: "corp.com".to_string(),
            is_valid: true,
            confidence: 0.8,
        });
        BusinessCardData {
            name: Some(PersonName {
                full_name: "Jane Doe".to_string(),
                first_name: Some("Jane".to_string()),
                last_name: Some("Doe".to_string()),
                prefix: None,
                suffix: None,
            }),
            title: Some("Director".to_string()),
            company: None,
            contact_info,
            social_media: Vec::new(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_is_complete() {
        let card = sample_card();
        assert!(card.is_complete());
    }

    #[test]
    fn test_incomplete_without_title_and_company() {
        let mut card = sample_card();
        card.title = None;
        card.company = None;
        assert!(!card.is_complete());
    }

    #[test]
    fn test_incomplete_without_reachability() {
        let mut card = sample_card();
        card.contact_info.phone_numbers.clear();
        card.contact_info.email_addresses.clear();
        assert!(!card.is_complete());
    }

    #[test]
    fn test_to_record_flattening() {
        let card = sample_card();
        let record = card.to_record();
        assert_eq!(record.get("name").map(String::as_str), Some("Jane Doe"));
        assert_eq!(
            record.get("phone_1").map(String::as_str),
            Some("(555) 123-4567")
        );
        assert_eq!(
            record.get("email_1").map(String::as_str),
            Some("jane@corp.com")
        );
        assert!(!record.contains_key("company"));
    }
}
