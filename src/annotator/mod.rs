//! Pluggable text annotation capability
//!
//! Platform data detectors and named-entity taggers are OS-specific services.
//! This module abstracts them behind the [`TextAnnotator`] trait so the
//! pipeline can run anywhere:
//!
//! - **RuleBasedAnnotator**: portable regex/gazetteer implementation; every
//!   behavioral contract in this crate is satisfiable with it alone.
//! - An ML-backed, locale-aware annotator can be plugged in at the same seam
//!   without touching the extractors.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::annotator::{RuleBasedAnnotator, TextAnnotator, DataDetectionKind};
//!
//! let annotator = RuleBasedAnnotator::new();
//! let detections = annotator.detect_data("Call (415) 555-2671 today").unwrap();
//! assert!(detections
//!     .iter()
//!     .any(|d| d.kind == DataDetectionKind::PhoneNumber));
//! ```

mod rule_based;

pub use rule_based::RuleBasedAnnotator;

use crate::error::Result;
use std::ops::Range;

/// Category of a span found by the data-detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDetectionKind {
    PhoneNumber,
    Link,
    Address,
    Date,
}

/// One span found by the data-detection pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDetection {
    pub kind: DataDetectionKind,
    /// Byte range of the match in the input text.
    pub range: Range<usize>,
    pub text: String,
}

/// Named-entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityTag {
    Person,
    Place,
    Organization,
}

/// One named entity found by the tagging pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpan {
    pub tag: EntityTag,
    /// Byte range of the match in the input text.
    pub range: Range<usize>,
    pub text: String,
}

/// Capability interface for platform-style text annotation.
///
/// Implementations must be pure with respect to shared mutable state; the
/// coordinator fans extractors out across threads and shares one annotator.
pub trait TextAnnotator: Send + Sync {
    /// Detects phone numbers, links, addresses, and dates.
    fn detect_data(&self, text: &str) -> Result<Vec<DataDetection>>;

    /// Tags person, place, and organization entities.
    fn tag_entities(&self, text: &str) -> Result<Vec<EntitySpan>>;
}
