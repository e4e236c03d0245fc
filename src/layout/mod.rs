//! Document layout analysis
//!
//! Reconstructs document structure from spatially unordered OCR blocks:
//! reading order, a title, hierarchical sections, bullet and numbered lists,
//! and tables (via [`TableDetector`]). The result carries an integer-derived
//! `is_structured` verdict and a confidence blended with the OCR engine's own
//! block confidences.
//!
//! # Usage
//!
//! ```rust
//! use docstruct::geometry::BoundingBox;
//! use docstruct::layout::DocumentLayoutAnalyzer;
//! use docstruct::model::TextBlock;
//!
//! let blocks = vec![
//!     TextBlock::new("MEETING NOTES", BoundingBox::new(0.35, 0.9, 0.3, 0.05), 0.95),
//!     TextBlock::new("• review budget", BoundingBox::new(0.05, 0.8, 0.4, 0.04), 0.9),
//! ];
//! let layout = DocumentLayoutAnalyzer::new().analyze(&blocks, None);
//! assert_eq!(layout.title.as_deref(), Some("MEETING NOTES"));
//! assert_eq!(layout.bullet_points.len(), 1);
//! ```

mod table_detector;

pub use table_detector::{TableDetector, TableDetectorConfig};

use crate::geometry::{BoundingBox, ImageSize};
use crate::model::{
    BulletPoint, DocumentLayout, DocumentSection, NumberedItem, NumberedList, TextBlock,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;

const BULLET_GLYPHS: [char; 8] = ['•', '◦', '▪', '▫', '‣', '-', '*', '·'];

const HEADING_KEYWORDS: [&str; 11] = [
    "title",
    "heading",
    "section",
    "chapter",
    "part",
    "summary",
    "introduction",
    "conclusion",
    "overview",
    "details",
    "information",
];

lazy_static! {
    /// Numbering markers, in match order.
    static ref NUMBERING_RES: Vec<Regex> = vec![
        Regex::new(r"^\s*\d+\.\s*(.*)$").unwrap(),
        Regex::new(r"^\s*\d+\)\s*(.*)$").unwrap(),
        Regex::new(r"^\s*[a-z]\.\s*(.*)$").unwrap(),
        Regex::new(r"^\s*[A-Z]\.\s*(.*)$").unwrap(),
        Regex::new(r"^\s*(?:i|ii|iii|iv|v|vi|vii|viii|ix|x)\.\s*(.*)$").unwrap(),
        Regex::new(r"^\s*(?:I|II|III|IV|V|VI|VII|VIII|IX|X)\.\s*(.*)$").unwrap(),
    ];
}

/// Orders blocks and derives document structure. Deterministic given its
/// input; holds no cross-call state.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayoutAnalyzer {
    table_detector: TableDetector,
}

impl DocumentLayoutAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table_detector(table_detector: TableDetector) -> Self {
        Self { table_detector }
    }

    /// Analyzes the spatial layout of the given blocks.
    pub fn analyze(&self, blocks: &[TextBlock], image_size: Option<ImageSize>) -> DocumentLayout {
        if blocks.is_empty() {
            return DocumentLayout::default();
        }

        let sorted = sort_reading_order(blocks);
        let title = detect_title(&sorted);
        let tables = self.table_detector.detect_tables(blocks, image_size);
        let sections = extract_sections(&sorted);
        let bullet_points = extract_bullets(&sorted);
        let numbered_lists = extract_numbered_lists(&sorted);

        let mut score = 0u32;
        if title.is_some() {
            score += 1;
        }
        if sections.len() >= 2 {
            score += 2;
        }
        if !bullet_points.is_empty() {
            score += 1;
        }
        if !numbered_lists.is_empty() {
            score += 1;
        }
        if !tables.is_empty() {
            score += 2;
        }
        let is_structured = score >= 3;

        let heuristic = 0.6 + if is_structured { 0.3 } else { 0.0 };
        let mean_ocr =
            blocks.iter().map(|b| b.confidence).sum::<f64>() / blocks.len() as f64;
        let confidence = ((heuristic + mean_ocr) / 2.0).clamp(0.0, 1.0);

        tracing::debug!(
            score,
            is_structured,
            sections = sections.len(),
            tables = tables.len(),
            "layout analysis complete"
        );

        DocumentLayout {
            title,
            sections,
            bullet_points,
            numbered_lists,
            tables,
            is_structured,
            confidence,
        }
    }
}

/// Sorts blocks into natural reading order: top to bottom (descending Y,
/// with Y values binned at the row tolerance so near-equal rows compare
/// equal), then left to right.
fn sort_reading_order(blocks: &[TextBlock]) -> Vec<&TextBlock> {
    const ROW_TOLERANCE: f64 = 0.02;
    let mut sorted: Vec<&TextBlock> = blocks.iter().collect();
    sorted.sort_by(|a, b| {
        let bin_a = (a.bounding_box.y / ROW_TOLERANCE).round() as i64;
        let bin_b = (b.bounding_box.y / ROW_TOLERANCE).round() as i64;
        bin_b.cmp(&bin_a).then(
            a.bounding_box
                .x
                .partial_cmp(&b.bounding_box.x)
                .unwrap_or(Ordering::Equal),
        )
    });
    sorted
}

fn detect_title(sorted: &[&TextBlock]) -> Option<String> {
    for block in sorted.iter().take(3) {
        let text = block.text.trim();
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        let centered = {
            let mid = block.bounding_box.mid_x();
            mid > 0.3 && mid < 0.7
        };
        let clean = !text.contains('@') && !text.to_lowercase().contains("phone");
        let capitalized = words
            .iter()
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .count();
        if centered && words.len() <= 10 && clean && capitalized * 2 >= words.len() {
            return Some(text.to_string());
        }
        if is_caps_or_punct(text) && words.len() <= 10 {
            return Some(text.to_string());
        }
    }
    // Fallback: a reasonable-length first block.
    sorted.first().and_then(|block| {
        let text = block.text.trim();
        if (4..100).contains(&text.len()) && !text.contains('@') {
            Some(text.to_string())
        } else {
            None
        }
    })
}

/// True when the text carries no lowercase letters at all (uppercase,
/// digits, and punctuation only).
fn is_caps_or_punct(text: &str) -> bool {
    let mut has_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

fn is_section_header(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    let lower = trimmed.to_lowercase();
    if HEADING_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    if words.len() <= 5 && is_caps_or_punct(trimmed) {
        return true;
    }
    let title_case = words
        .iter()
        .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
        .count();
    if words.len() <= 8 && title_case * 2 >= words.len() {
        return true;
    }
    trimmed.ends_with(':') && words.len() <= 6
}

fn header_level(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if lower.contains("title") || lower.contains("main") || is_caps_or_punct(text.trim()) {
        1
    } else if lower.contains("section") || lower.contains("part") {
        2
    } else {
        3
    }
}

struct OpenSection {
    title: String,
    level: u8,
    bounding_box: BoundingBox,
    content: Vec<String>,
}

impl OpenSection {
    fn close(self) -> DocumentSection {
        DocumentSection {
            title: self.title,
            content: self.content.join(" "),
            level: self.level,
            bounding_box: self.bounding_box,
        }
    }
}

/// Folds the sorted blocks into sections: a header block opens a new section,
/// every following non-header block appends to its content.
fn extract_sections(sorted: &[&TextBlock]) -> Vec<DocumentSection> {
    let mut sections = Vec::new();
    let mut open: Option<OpenSection> = None;
    for block in sorted {
        let text = block.text.trim();
        if is_section_header(text) {
            if let Some(section) = open.take() {
                sections.push(section.close());
            }
            open = Some(OpenSection {
                title: text.to_string(),
                level: header_level(text),
                bounding_box: block.bounding_box,
                content: Vec::new(),
            });
        } else if let Some(section) = open.as_mut() {
            section.content.push(text.to_string());
            section.bounding_box = section.bounding_box.union(&block.bounding_box);
        }
    }
    if let Some(section) = open.take() {
        sections.push(section.close());
    }
    sections
}

fn extract_bullets(sorted: &[&TextBlock]) -> Vec<BulletPoint> {
    sorted
        .iter()
        .filter_map(|block| {
            let text = block.text.trim_start();
            let glyph = text.chars().next().filter(|c| BULLET_GLYPHS.contains(c))?;
            let stripped = text[glyph.len_utf8()..].trim();
            if stripped.is_empty() {
                return None;
            }
            let level = indentation_level(block.bounding_box.x);
            Some(BulletPoint {
                text: stripped.to_string(),
                level,
                bounding_box: block.bounding_box,
            })
        })
        .collect()
}

fn indentation_level(x: f64) -> u8 {
    if x < 0.1 {
        1
    } else if x < 0.2 {
        2
    } else {
        3
    }
}

fn numbered_item_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    NUMBERING_RES.iter().find_map(|re| {
        re.captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// Folds consecutive numbered blocks into lists. Assigned numbers are
/// sequential in emission order, ignoring the OCR'd digits, to tolerate
/// recognition errors.
fn extract_numbered_lists(sorted: &[&TextBlock]) -> Vec<NumberedList> {
    let mut lists = Vec::new();
    let mut open: Vec<NumberedItem> = Vec::new();
    for block in sorted {
        match numbered_item_text(&block.text) {
            Some(text) => {
                open.push(NumberedItem {
                    number: open.len() + 1,
                    text,
                    bounding_box: block.bounding_box,
                });
            }
            None => {
                if !open.is_empty() {
                    lists.push(NumberedList {
                        items: std::mem::take(&mut open),
                    });
                }
            }
        }
    }
    if !open.is_empty() {
        lists.push(NumberedList { items: open });
    }
    lists
}
