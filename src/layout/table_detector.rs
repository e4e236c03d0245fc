//! Spatial table detection
//!
//! Clusters OCR blocks into rows and columns by proximity in normalized
//! space, then validates and corrects the resulting table: header backfill,
//! row padding, OCR line-wrap merge, and confidence adjustment. The
//! tolerances are empirically tuned values pinned as contract by the tests;
//! override them through [`TableDetectorConfig`] rather than editing.

use crate::geometry::{BoundingBox, ImageSize};
use crate::model::{TableData, TextBlock};
use std::cmp::Ordering;

/// Tuning constants for spatial clustering.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Blocks whose Y differs by at most this much share a row.
    pub row_tolerance: f64,
    /// A block matches a column when its X is within this distance.
    pub column_tolerance: f64,
    /// A new row must start at least this far below the current row.
    pub min_row_gap: f64,
    /// Minimum columns for a table to be emitted.
    pub min_columns: usize,
    /// Minimum rows (including the header row) for a table to be emitted.
    pub min_rows: usize,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 0.02,
            column_tolerance: 0.03,
            min_row_gap: 0.05,
            min_columns: 2,
            min_rows: 2,
        }
    }
}

/// Clusters text blocks into tables by spatial proximity.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detects tables among the given blocks.
    ///
    /// Every returned table has passed [`Self::validate_and_correct`] and the
    /// [`TableData::is_valid`] gate. `image_size` only influences how far
    /// above a table the title search looks.
    pub fn detect_tables(
        &self,
        blocks: &[TextBlock],
        image_size: Option<ImageSize>,
    ) -> Vec<TableData> {
        let n = blocks.len();
        let mut order: Vec<usize> = (0..n).collect();
        // Top to bottom in normalized space: descending Y.
        order.sort_by(|&a, &b| {
            blocks[b]
                .bounding_box
                .y
                .partial_cmp(&blocks[a].bounding_box.y)
                .unwrap_or(Ordering::Equal)
        });

        let mut used = vec![false; n];
        let mut tables = Vec::new();

        for &start in &order {
            if used[start] {
                continue;
            }
            if let Some(table) = self.grow_table(blocks, &mut used, start, image_size) {
                let corrected = self.validate_and_correct(table);
                if corrected.is_valid() {
                    tables.push(corrected);
                }
            }
        }

        tracing::debug!(tables = tables.len(), "table detection complete");
        tables
    }

    /// Attempts to grow a table starting from `start`'s row.
    fn grow_table(
        &self,
        blocks: &[TextBlock],
        used: &mut [bool],
        start: usize,
        image_size: Option<ImageSize>,
    ) -> Option<TableData> {
        let start_y = blocks[start].bounding_box.y;

        // Candidate first row: every unprocessed block within the row tolerance.
        let mut first_row: Vec<usize> = (0..blocks.len())
            .filter(|&j| !used[j] && (blocks[j].bounding_box.y - start_y).abs() <= self.config.row_tolerance)
            .collect();
        if first_row.len() < self.config.min_columns {
            return None;
        }
        first_row.sort_by(|&a, &b| {
            blocks[a]
                .bounding_box
                .x
                .partial_cmp(&blocks[b].bounding_box.x)
                .unwrap_or(Ordering::Equal)
        });

        let column_xs: Vec<f64> = first_row.iter().map(|&j| blocks[j].bounding_box.x).collect();
        let mut rows: Vec<Vec<Option<usize>>> = vec![first_row.iter().copied().map(Some).collect()];
        for &j in &first_row {
            used[j] = true;
        }

        let mut current_y = start_y;
        loop {
            match self.match_next_row(blocks, used, &column_xs, current_y) {
                Some((cells, anchor_y)) => {
                    for cell in cells.iter().flatten() {
                        used[*cell] = true;
                    }
                    rows.push(cells);
                    current_y = anchor_y;
                }
                None => break,
            }
        }

        if rows.len() < self.config.min_rows {
            // Give the blocks back; a failed table must not eat a future row.
            for cell in rows.iter().flatten().flatten() {
                used[*cell] = false;
            }
            return None;
        }

        let bounding_box = rows
            .iter()
            .flatten()
            .flatten()
            .map(|&j| blocks[j].bounding_box)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default();

        let first_row_blocks = &rows[0];
        let confidence = first_row_blocks
            .iter()
            .flatten()
            .map(|&j| blocks[j].confidence)
            .sum::<f64>()
            / first_row_blocks.len() as f64;

        let cell_text = |cell: &Option<usize>| {
            cell.map(|j| blocks[j].text.clone()).unwrap_or_default()
        };
        let headers: Vec<String> = rows[0].iter().map(cell_text).collect();
        let body: Vec<Vec<String>> = rows[1..]
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let title = self.find_title(blocks, used, &bounding_box, image_size);

        Some(TableData {
            title,
            headers,
            rows: body,
            bounding_box,
            confidence: confidence.clamp(0.0, 1.0),
        })
    }

    /// Finds the next row below `current_y`, matching recorded column
    /// positions. Accepts a row when at least `columns − 1` cells match;
    /// missing cells are padded empty.
    fn match_next_row(
        &self,
        blocks: &[TextBlock],
        used: &[bool],
        column_xs: &[f64],
        current_y: f64,
    ) -> Option<(Vec<Option<usize>>, f64)> {
        let mut anchors: Vec<usize> = (0..blocks.len())
            .filter(|&j| !used[j] && current_y - blocks[j].bounding_box.y >= self.config.min_row_gap)
            .collect();
        // Closest row first.
        anchors.sort_by(|&a, &b| {
            blocks[b]
                .bounding_box
                .y
                .partial_cmp(&blocks[a].bounding_box.y)
                .unwrap_or(Ordering::Equal)
        });

        for &anchor in &anchors {
            let anchor_y = blocks[anchor].bounding_box.y;
            let mut cells: Vec<Option<usize>> = Vec::with_capacity(column_xs.len());
            let mut matched = 0usize;
            for &col_x in column_xs {
                let best = (0..blocks.len())
                    .filter(|&j| !used[j] && !cells.contains(&Some(j)))
                    .filter(|&j| {
                        (blocks[j].bounding_box.x - col_x).abs() <= self.config.column_tolerance
                            && (blocks[j].bounding_box.y - anchor_y).abs()
                                <= self.config.row_tolerance
                    })
                    .min_by(|&a, &b| {
                        (blocks[a].bounding_box.x - col_x)
                            .abs()
                            .partial_cmp(&(blocks[b].bounding_box.x - col_x).abs())
                            .unwrap_or(Ordering::Equal)
                    });
                if best.is_some() {
                    matched += 1;
                }
                cells.push(best);
            }
            if matched + 1 >= column_xs.len() && cells.contains(&Some(anchor)) {
                return Some((cells, anchor_y));
            }
        }
        None
    }

    /// Looks for a short block just above the table to use as its title.
    fn find_title(
        &self,
        blocks: &[TextBlock],
        used: &[bool],
        bbox: &BoundingBox,
        image_size: Option<ImageSize>,
    ) -> Option<String> {
        let gap = image_size
            .map(|size| (40.0 / size.height).clamp(0.05, 0.15))
            .unwrap_or(0.08);
        let table_top = bbox.max_y();
        blocks
            .iter()
            .enumerate()
            .filter(|(j, block)| {
                !used[*j]
                    && block.bounding_box.y >= table_top
                    && block.bounding_box.y - table_top <= gap
                    && block.bounding_box.overlaps_horizontally(bbox)
                    && block.text.split_whitespace().count() <= 8
            })
            .min_by(|(_, a), (_, b)| {
                (a.bounding_box.y - table_top)
                    .partial_cmp(&(b.bounding_box.y - table_top))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|(_, block)| block.text.trim().to_string())
    }

    /// Validates and corrects a detected table. Pure and idempotent: a table
    /// that needs no structural change is returned untouched, confidence
    /// included.
    pub fn validate_and_correct(&self, table: TableData) -> TableData {
        let mut headers: Vec<String> = table.headers.iter().map(|h| clean_cell(h)).collect();
        while headers.last().is_some_and(|h| h.is_empty()) {
            headers.pop();
        }
        for (i, header) in headers.iter_mut().enumerate() {
            if header.is_empty() {
                *header = format!("Column {}", i + 1);
            }
        }
        while headers.len() < self.config.min_columns {
            headers.push(format!("Column {}", headers.len() + 1));
        }
        let width = headers.len();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for row in &table.rows {
            let mut cells: Vec<String> = row.iter().map(|c| clean_cell(c)).collect();
            cells.resize(width, String::new());
            cells.truncate(width);
            if cells.iter().all(String::is_empty) {
                continue;
            }
            rows.push(cells);
        }

        // Merge OCR line-wrap artifacts until stable.
        loop {
            let merged = merge_split_rows(&rows);
            if merged == rows {
                break;
            }
            rows = merged;
        }

        if headers == table.headers && rows == table.rows {
            return table;
        }

        let corrected = TableData {
            title: table.title,
            headers,
            rows,
            bounding_box: table.bounding_box,
            confidence: table.confidence,
        };
        let mut confidence = table.confidence * (1.0 - 0.5 * corrected.empty_cell_ratio());
        if corrected.rows.len() >= 3 && corrected.headers.len() >= 2 {
            confidence *= 1.1;
        }
        TableData {
            confidence: confidence.clamp(0.0, 1.0),
            ..corrected
        }
    }
}

/// Collapses whitespace and strips control characters from a cell.
///
/// Whitespace collapses first so a tab between words becomes a separator
/// rather than being stripped as a control character.
fn clean_cell(cell: &str) -> String {
    cell.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

fn merge_split_rows(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = Vec::new();
    for row in rows {
        if let Some(prev) = out.last_mut() {
            if is_split_continuation(prev, row) {
                for (target, cell) in prev.iter_mut().zip(row) {
                    if cell.is_empty() {
                        continue;
                    }
                    if target.is_empty() {
                        *target = cell.clone();
                    } else {
                        target.push(' ');
                        target.push_str(cell);
                    }
                }
                continue;
            }
        }
        out.push(row.clone());
    }
    out
}

/// A row is a line-wrap continuation of the previous one when it carries far
/// fewer cells, or its first cell reads like the tail of a wrapped sentence.
fn is_split_continuation(prev: &[String], row: &[String]) -> bool {
    let prev_nonempty = prev.iter().filter(|c| !c.is_empty()).count();
    let row_nonempty = row.iter().filter(|c| !c.is_empty()).count();
    if row_nonempty == 0 {
        return false;
    }
    if (row_nonempty as f64) < prev_nonempty as f64 / 2.0 {
        return true;
    }
    if let Some(first) = row.iter().find(|c| !c.is_empty()) {
        let starts_lower = first.chars().next().is_some_and(char::is_lowercase);
        let no_terminal = !first.trim_end().ends_with(['.', '!', '?', ':', ';']);
        return starts_lower && no_terminal && first.len() < 30;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, x: f64, y: f64) -> TextBlock {
        TextBlock::new(text, BoundingBox::new(x, y, 0.1, 0.02), 0.9)
    }

    fn grid() -> Vec<TextBlock> {
        vec![
            block("Name", 0.1, 0.8),
            block("Qty", 0.4, 0.8),
            block("Widget", 0.1, 0.7),
            block("3", 0.4, 0.7),
            block("Gadget", 0.1, 0.6),
            block("5", 0.4, 0.6),
        ]
    }

    #[test]
    fn test_config_defaults_pinned() {
        let config = TableDetectorConfig::default();
        assert!((config.row_tolerance - 0.02).abs() < 1e-9);
        assert!((config.column_tolerance - 0.03).abs() < 1e-9);
        assert!((config.min_row_gap - 0.05).abs() < 1e-9);
        assert_eq!(config.min_columns, 2);
        assert_eq!(config.min_rows, 2);
    }

    #[test]
    fn test_detects_simple_grid() {
        let detector = TableDetector::new();
        let tables = detector.detect_tables(&grid(), None);
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.headers, vec!["Name", "Qty"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Widget".to_string(), "3".to_string()],
                vec!["Gadget".to_string(), "5".to_string()],
            ]
        );
        assert!(table.is_valid());
        assert!((table.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_single_row_is_not_a_table() {
        let detector = TableDetector::new();
        let blocks = vec![block("Name", 0.1, 0.8), block("Qty", 0.4, 0.8)];
        assert!(detector.detect_tables(&blocks, None).is_empty());
    }

    #[test]
    fn test_scattered_blocks_form_no_table() {
        let detector = TableDetector::new();
        let blocks = vec![
            block("alpha", 0.1, 0.9),
            block("beta", 0.5, 0.6),
            block("gamma", 0.2, 0.3),
        ];
        assert!(detector.detect_tables(&blocks, None).is_empty());
    }

    #[test]
    fn test_missing_cell_padded() {
        let detector = TableDetector::new();
        let mut blocks = grid();
        // Remove "5" so the last row only matches one of two columns
        blocks.retain(|b| b.text != "5");
        let tables = detector.detect_tables(&blocks, None);
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0].rows,
            vec![
                vec!["Widget".to_string(), "3".to_string()],
                vec!["Gadget".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_table_title_found_above() {
        let detector = TableDetector::new();
        let mut blocks = grid();
        blocks.push(block("Inventory", 0.1, 0.87));
        let tables = detector.detect_tables(&blocks, None);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].title.as_deref(), Some("Inventory"));
    }

    #[test]
    fn test_bounding_box_is_union() {
        let detector = TableDetector::new();
        let tables = detector.detect_tables(&grid(), None);
        let bbox = tables[0].bounding_box;
        assert!((bbox.x - 0.1).abs() < 1e-9);
        assert!((bbox.y - 0.6).abs() < 1e-9);
        assert!((bbox.max_x() - 0.5).abs() < 1e-9);
        assert!((bbox.max_y() - 0.82).abs() < 1e-9);
    }

    fn raw_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> TableData {
        TableData {
            title: None,
            headers: headers.into_iter().map(String::from).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            bounding_box: BoundingBox::default(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_trailing_empty_headers_trimmed() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "B", "", ""], vec![vec!["1", "2", "", ""]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.headers, vec!["A", "B"]);
        assert_eq!(corrected.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_interior_empty_header_backfilled() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "", "C"], vec![vec!["1", "2", "3"]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.headers, vec!["A", "Column 2", "C"]);
    }

    #[test]
    fn test_minimum_two_headers_enforced() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["Only"], vec![vec!["1"]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.headers, vec!["Only", "Column 2"]);
        assert!(corrected.is_valid());
    }

    #[test]
    fn test_rows_padded_and_truncated() {
        let detector = TableDetector::new();
        let table = raw_table(
            vec!["A", "B"],
            vec![vec!["1"], vec!["1", "2", "3"]],
        );
        let corrected = detector.validate_and_correct(table);
        assert!(corrected
            .rows
            .iter()
            .all(|row| row.len() == corrected.headers.len()));
    }

    #[test]
    fn test_all_empty_rows_stripped() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "B"], vec![vec!["", ""], vec!["1", "2"]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.rows.len(), 1);
    }

    #[test]
    fn test_split_row_merged_by_lowercase_continuation() {
        let detector = TableDetector::new();
        let table = raw_table(
            vec!["Item", "Notes"],
            vec![
                vec!["Widget", "Ships in two"],
                vec!["", "business days"],
            ],
        );
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.rows.len(), 1);
        assert_eq!(corrected.rows[0][1], "Ships in two business days");
    }

    #[test]
    fn test_cell_text_cleaned() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "B"], vec![vec!["a\tmessy\u{7}  cell", "x"]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.rows[0][0], "a messy cell");
    }

    #[test]
    fn test_tab_separated_words_stay_separated() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "B"], vec![vec!["unit\tprice", "x"]]);
        let corrected = detector.validate_and_correct(table);
        assert_eq!(corrected.rows[0][0], "unit price");
    }

    #[test]
    fn test_empty_cell_ratio_penalizes_confidence() {
        let detector = TableDetector::new();
        let table = raw_table(vec!["A", "B", ""], vec![vec!["1", "", ""]]);
        let corrected = detector.validate_and_correct(table);
        // One of two remaining cells empty: 0.8 * (1 - 0.5 * 0.5) = 0.6
        assert!((corrected.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_large_table_confidence_bonus() {
        let detector = TableDetector::new();
        let table = raw_table(
            vec!["A", "B", ""],
            vec![
                vec!["1", "2", ""],
                vec!["3", "4", ""],
                vec!["5", "6", ""],
            ],
        );
        let corrected = detector.validate_and_correct(table);
        // No empty cells after trimming, 3 rows x 2 cols: 0.8 * 1.1
        assert!((corrected.confidence - 0.88).abs() < 1e-9);
    }

    #[test]
    fn test_validate_is_idempotent() {
        let detector = TableDetector::new();
        let table = raw_table(
            vec!["Item", "Notes", ""],
            vec![
                vec!["Widget", "Ships in two", ""],
                vec!["", "business days", ""],
                vec!["Gadget", "In stock", ""],
            ],
        );
        let once = detector.validate_and_correct(table);
        let twice = detector.validate_and_correct(once.clone());
        assert_eq!(once, twice);
    }
}
