//! Normalized geometry primitives for OCR block positions
//!
//! All coordinates in this crate live on the unit square `[0,1] × [0,1]`,
//! matching the coordinate system of the source image as reported by the OCR
//! engine. The Y axis grows upward: a block near the top of the page has a
//! larger `y` than a block near the bottom, which is why reading order sorts
//! by *descending* Y.

use serde::{Deserialize, Serialize};

/// A rectangle in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge, in `[0,1]`.
    pub x: f64,
    /// Bottom edge, in `[0,1]`.
    pub y: f64,
    /// Width, in `[0,1]`.
    pub width: f64,
    /// Height, in `[0,1]`.
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal midpoint of the box.
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical midpoint of the box.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Right edge of the box.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge of the box.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        BoundingBox::new(x, y, max_x - x, max_y - y)
    }

    /// True if the horizontal extents of the two boxes overlap.
    pub fn overlaps_horizontally(&self, other: &BoundingBox) -> bool {
        self.x < other.max_x() && other.x < self.max_x()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Pixel dimensions of the source image.
///
/// Only used to convert pixel-based search distances (e.g. the table
/// title-search gap) into normalized units; the pipeline otherwise works
/// entirely in normalized space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_x() {
        let bbox = BoundingBox::new(0.2, 0.5, 0.4, 0.1);
        assert!((bbox.mid_x() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_union_contains_both() {
        let a = BoundingBox::new(0.1, 0.1, 0.2, 0.2);
        let b = BoundingBox::new(0.5, 0.4, 0.3, 0.1);
        let u = a.union(&b);
        assert!((u.x - 0.1).abs() < 1e-9);
        assert!((u.y - 0.1).abs() < 1e-9);
        assert!((u.max_x() - 0.8).abs() < 1e-9);
        assert!((u.max_y() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_union_is_commutative() {
        let a = BoundingBox::new(0.0, 0.2, 0.5, 0.3);
        let b = BoundingBox::new(0.3, 0.0, 0.2, 0.6);
        assert_eq!(a.union(&b), b.union(&a));
    }

    #[test]
    fn test_horizontal_overlap() {
        let a = BoundingBox::new(0.1, 0.0, 0.3, 0.1);
        let b = BoundingBox::new(0.3, 0.5, 0.3, 0.1);
        let c = BoundingBox::new(0.7, 0.0, 0.2, 0.1);
        assert!(a.overlaps_horizontally(&b));
        assert!(!a.overlaps_horizontally(&c));
    }
}
