//! # docstruct
//!
//! A structured-document-understanding pipeline in pure Rust: it turns raw OCR
//! output (recognized text plus per-block spatial and confidence metadata)
//! into a typed model of the document's semantics with no machine-learned
//! components.
//!
//! ## Features
//!
//! - **Contact extraction**: Phone numbers, emails, postal addresses, URLs,
//!   and dates with per-item confidence
//! - **Table detection**: Spatial row/column clustering over OCR blocks with
//!   idempotent validation and correction
//! - **Layout analysis**: Reading-order reconstruction, title and section
//!   detection, bullet and numbered lists
//! - **Business cards**: Multi-factor gated detection with name, title,
//!   company, and social-handle extraction
//! - **Entities**: People, places, organizations, dates, currency amounts,
//!   and products
//! - **Classification & generation**: Document-type classification driving
//!   per-type summary, action items, and smart tags
//! - **Pluggable annotation**: Platform data detectors and entity taggers sit
//!   behind the [`TextAnnotator`](annotator::TextAnnotator) trait; the bundled
//!   rule-based implementation is fully portable
//!
//! ## Quick Start
//!
//! ```rust
//! use docstruct::{DocumentType, ExtractionOptions, StructuredTextExtractor};
//!
//! let extractor = StructuredTextExtractor::new();
//! let data = extractor.extract(
//!     "John Smith\nSenior Director\nAcme Corp\n(555) 123-4567\njohn@acme.com",
//!     &[],
//!     None,
//!     &ExtractionOptions::comprehensive(),
//! );
//!
//! assert_eq!(data.document_type, DocumentType::BusinessCard);
//! let card = data.business_card.unwrap();
//! assert_eq!(card.name.unwrap().full_name, "John Smith");
//! assert!(data.tags.iter().any(|t| t == "networking"));
//! ```
//!
//! ## Extracting from OCR blocks
//!
//! ```rust
//! use docstruct::{BoundingBox, DocumentLayoutAnalyzer, TextBlock};
//!
//! // Coordinates are normalized to the unit square; Y grows upward.
//! let blocks = vec![
//!     TextBlock::new("MEETING AGENDA", BoundingBox::new(0.35, 0.95, 0.3, 0.04), 0.98),
//!     TextBlock::new("1. Budget review", BoundingBox::new(0.05, 0.85, 0.5, 0.03), 0.92),
//!     TextBlock::new("2. Hiring plan", BoundingBox::new(0.05, 0.80, 0.5, 0.03), 0.93),
//! ];
//!
//! let layout = DocumentLayoutAnalyzer::new().analyze(&blocks, None);
//! assert_eq!(layout.title.as_deref(), Some("MEETING AGENDA"));
//! assert_eq!(layout.numbered_lists.len(), 1);
//! ```

pub mod annotator;
pub mod business_card;
pub mod contact;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod pipeline;

pub use business_card::{BusinessCardProcessor, CardThresholds};
pub use contact::ContactInfoExtractor;
pub use entities::EntityExtractor;
pub use error::{ExtractError, Result};
pub use geometry::{BoundingBox, ImageSize};
pub use layout::{DocumentLayoutAnalyzer, TableDetector, TableDetectorConfig};
pub use model::{
    BusinessCardData, ContactInfo, DocumentLayout, DocumentType, ExtractedEntities, PersonName,
    StructuredTextData, TableData, TextBlock,
};
pub use pipeline::{ExtractionOptions, StructuredTextExtractor};
