//! Typed data model for structured document understanding
//!
//! Everything the pipeline produces is an owned, serializable value: the
//! extractors build fresh instances per call and never mutate a result after
//! returning it. The root aggregate is [`StructuredTextData`].

mod business_card;
mod contact;
mod entities;
mod layout;
mod structured;

pub use business_card::{BusinessCardData, PersonName, SocialMediaInfo, SocialPlatform};
pub use contact::{
    ContactInfo, DateReference, EmailAddress, PhoneNumber, PhoneType, PostalAddress, UrlReference,
};
pub use entities::{CurrencyReference, ExtractedEntities};
pub use layout::{
    BulletPoint, DocumentLayout, DocumentSection, NumberedItem, NumberedList, TableData,
};
pub use structured::{ActionItem, ActionPriority, DocumentType, StructuredTextData};

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// One unit of recognized text produced by the external OCR engine.
///
/// Blocks are immutable inputs; many blocks form one document. The bounding
/// box is normalized to the unit square and `confidence` is the OCR engine's
/// recognition confidence in `[0,1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bounding_box: BoundingBox,
    pub confidence: f64,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox, confidence: f64) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence,
        }
    }
}
