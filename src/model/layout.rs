//! Document layout structure types
//!
//! The layout analyzer reconstructs document structure from spatially
//! unordered OCR blocks: a title, hierarchical sections, bullet and numbered
//! lists, and tables. Tables carry their own validation gate used by callers
//! before a detected table is accepted.

use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// Structural interpretation of a document's OCR blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentLayout {
    pub title: Option<String>,
    pub sections: Vec<DocumentSection>,
    pub bullet_points: Vec<BulletPoint>,
    pub numbered_lists: Vec<NumberedList>,
    pub tables: Vec<TableData>,
    /// True when the structure score crosses the structured threshold.
    pub is_structured: bool,
    pub confidence: f64,
}

/// A titled region of the document.
///
/// Content accumulates consecutive non-header blocks until the next header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub title: String,
    pub content: String,
    /// Hierarchy level, 1 = top.
    pub level: u8,
    pub bounding_box: BoundingBox,
}

/// A single bullet item with its indentation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletPoint {
    pub text: String,
    /// Indentation level derived from the block's left edge, 1 = outermost.
    pub level: u8,
    pub bounding_box: BoundingBox,
}

/// An ordered list reconstructed from consecutive numbered blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberedList {
    pub items: Vec<NumberedItem>,
}

/// One item of a numbered list.
///
/// `number` is assigned sequentially in emission order, independent of the
/// OCR'd marker, to tolerate digit recognition errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberedItem {
    pub number: usize,
    pub text: String,
    pub bounding_box: BoundingBox,
}

/// A table clustered from spatially aligned blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub bounding_box: BoundingBox,
    pub confidence: f64,
}

impl TableData {
    /// Gate applied by callers before a corrected table is accepted.
    ///
    /// Holds after validation: at least 2 headers, at least one row, and
    /// every row exactly as wide as the header row.
    pub fn is_valid(&self) -> bool {
        self.headers.len() >= 2
            && !self.rows.is_empty()
            && self.rows.iter().all(|row| row.len() == self.headers.len())
    }

    /// Fraction of body cells that are empty, in `[0,1]`.
    pub fn empty_cell_ratio(&self) -> f64 {
        let total: usize = self.rows.iter().map(Vec::len).sum();
        if total == 0 {
            return 0.0;
        }
        let empty = self
            .rows
            .iter()
            .flatten()
            .filter(|cell| cell.trim().is_empty())
            .count();
        empty as f64 / total as f64
    }
}
