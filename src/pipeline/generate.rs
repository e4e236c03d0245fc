//! Type-conditioned summary, action-item, and tag generation
//!
//! Pure functions dispatching exhaustively on [`DocumentType`]; adding a
//! variant forces each generator to handle it.

use crate::model::{
    ActionItem, ActionPriority, BusinessCardData, ContactInfo, CurrencyReference, DocumentLayout,
    DocumentType, ExtractedEntities,
};

/// Hard cap on the emitted tag set.
const MAX_TAGS: usize = 8;

pub(crate) fn generate_summary(
    doc_type: DocumentType,
    card: Option<&BusinessCardData>,
    layout: Option<&DocumentLayout>,
    entities: Option<&ExtractedEntities>,
) -> String {
    if doc_type == DocumentType::BusinessCard {
        if let Some(card) = card {
            return card_summary(card);
        }
    }

    let mut parts = vec![doc_type.label().to_string()];
    if let Some(title) = layout.and_then(|l| l.title.as_deref()) {
        parts.push(title.to_string());
    }
    match doc_type {
        DocumentType::Receipt => {
            if let Some(total) = entities.and_then(|e| highest_amount(&e.currencies)) {
                parts.push(total.raw.clone());
            }
        }
        DocumentType::Form => parts.push("Requires completion".to_string()),
        _ => {}
    }
    parts.join(" - ")
}

/// `"Business Card - Contact: X | Title: Y | Company: Z | Phone: … | Email: …"`
/// joining only the fields that are present.
fn card_summary(card: &BusinessCardData) -> String {
    let mut fields = Vec::new();
    if let Some(name) = &card.name {
        fields.push(format!("Contact: {}", name.full_name));
    }
    if let Some(title) = &card.title {
        fields.push(format!("Title: {title}"));
    }
    if let Some(company) = &card.company {
        fields.push(format!("Company: {company}"));
    }
    if let Some(phone) = card.contact_info.phone_numbers.first() {
        fields.push(format!("Phone: {}", phone.formatted));
    }
    if let Some(email) = card.contact_info.email_addresses.first() {
        fields.push(format!("Email: {}", email.address));
    }
    if fields.is_empty() {
        "Business Card".to_string()
    } else {
        format!("Business Card - {}", fields.join(" | "))
    }
}

fn highest_amount(currencies: &[CurrencyReference]) -> Option<&CurrencyReference> {
    currencies
        .iter()
        .max_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(std::cmp::Ordering::Equal))
}

pub(crate) fn generate_action_items(
    doc_type: DocumentType,
    card: Option<&BusinessCardData>,
    entities: Option<&ExtractedEntities>,
) -> Vec<ActionItem> {
    match doc_type {
        DocumentType::BusinessCard => {
            let mut items = vec![ActionItem::new("Add contact to CRM", ActionPriority::Medium)];
            let has_email = card
                .map(|c| !c.contact_info.email_addresses.is_empty())
                .unwrap_or(false);
            if has_email {
                items.push(ActionItem::new("Send follow-up email", ActionPriority::Medium));
            }
            items
        }
        DocumentType::Form => vec![
            ActionItem::new("Complete form", ActionPriority::High),
            ActionItem::new("Submit completed form", ActionPriority::Medium),
        ],
        DocumentType::Notice => {
            let mut items = vec![ActionItem::new("Review notice details", ActionPriority::Medium)];
            let has_dates = entities.map(|e| !e.dates.is_empty()).unwrap_or(false);
            if has_dates {
                items.push(ActionItem::new("Add date to calendar", ActionPriority::Medium));
            }
            items
        }
        DocumentType::Receipt => {
            vec![ActionItem::new("File receipt for records", ActionPriority::Low)]
        }
        DocumentType::Letter => vec![ActionItem::new("Reply to letter", ActionPriority::Medium)],
        DocumentType::Flyer => {
            vec![ActionItem::new("Check event details", ActionPriority::Low)]
        }
        DocumentType::Menu | DocumentType::Generic => {
            vec![ActionItem::new("Review document", ActionPriority::Low)]
        }
    }
}

/// Builds the tag set: type tag, type-specific tags, entity-derived tags
/// lowercased, then contact-presence tags; deduplicated and capped.
pub(crate) fn generate_smart_tags(
    doc_type: DocumentType,
    contact: Option<&ContactInfo>,
    entities: Option<&ExtractedEntities>,
) -> Vec<String> {
    let mut tags = vec![doc_type.tag().to_string()];

    let type_specific: &[&str] = match doc_type {
        DocumentType::BusinessCard => &["networking", "contact"],
        DocumentType::Notice => &["announcement"],
        DocumentType::Form => &["paperwork", "todo"],
        DocumentType::Receipt => &["expense", "purchase"],
        DocumentType::Letter => &["correspondence"],
        DocumentType::Flyer => &["event"],
        DocumentType::Menu => &["food"],
        DocumentType::Generic => &[],
    };
    for tag in type_specific {
        push_tag(&mut tags, tag);
    }

    if let Some(entities) = entities {
        for name in entities
            .people
            .iter()
            .chain(&entities.organizations)
            .chain(&entities.places)
        {
            push_tag(&mut tags, &name.to_lowercase());
        }
    }

    if let Some(contact) = contact {
        if !contact.phone_numbers.is_empty() {
            push_tag(&mut tags, "phone");
        }
        if !contact.email_addresses.is_empty() {
            push_tag(&mut tags, "email");
        }
        if !contact.addresses.is_empty() {
            push_tag(&mut tags, "address");
        }
        if !contact.urls.is_empty() {
            push_tag(&mut tags, "website");
        }
    }

    tags.truncate(MAX_TAGS);
    tags
}

fn push_tag(tags: &mut Vec<String>, tag: &str) {
    if tags.len() < MAX_TAGS && !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}
