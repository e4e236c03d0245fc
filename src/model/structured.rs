//! Document classification and the root extraction aggregate

use super::business_card::BusinessCardData;
use super::contact::ContactInfo;
use super::entities::ExtractedEntities;
use super::layout::DocumentLayout;
use serde::{Deserialize, Serialize};

/// Closed set of recognized document categories.
///
/// The classification drives summary, action-item, and tag generation through
/// exhaustive matches; adding a variant forces every generator to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    BusinessCard,
    Notice,
    Form,
    Receipt,
    Letter,
    Flyer,
    Menu,
    Generic,
}

impl DocumentType {
    /// Human-readable label used as the summary prefix.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::BusinessCard => "Business Card",
            DocumentType::Notice => "Notice",
            DocumentType::Form => "Form",
            DocumentType::Receipt => "Receipt",
            DocumentType::Letter => "Letter",
            DocumentType::Flyer => "Flyer",
            DocumentType::Menu => "Menu",
            DocumentType::Generic => "Document",
        }
    }

    /// Snake-case tag emitted into the smart-tag set.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentType::BusinessCard => "business_card",
            DocumentType::Notice => "notice",
            DocumentType::Form => "form",
            DocumentType::Receipt => "receipt",
            DocumentType::Letter => "letter",
            DocumentType::Flyer => "flyer",
            DocumentType::Menu => "menu",
            DocumentType::Generic => "document",
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        DocumentType::Generic
    }
}

/// Urgency of a generated action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionPriority {
    Low,
    Medium,
    High,
}

/// A follow-up suggested from the document's classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub title: String,
    pub priority: ActionPriority,
}

impl ActionItem {
    pub fn new(title: impl Into<String>, priority: ActionPriority) -> Self {
        Self {
            title: title.into(),
            priority,
        }
    }
}

/// Root aggregate produced by one extraction call.
///
/// Created once per call and immutable once returned; collaborators never
/// mutate it. Lifetime is call-scoped — persistence belongs elsewhere.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructuredTextData {
    pub contact_info: Option<ContactInfo>,
    pub business_card: Option<BusinessCardData>,
    pub document_layout: Option<DocumentLayout>,
    pub extracted_entities: Option<ExtractedEntities>,
    pub document_type: DocumentType,
    pub processing_confidence: f64,
    pub summary: Option<String>,
    pub action_items: Vec<String>,
    pub tags: Vec<String>,
}
