//! Tile geometry emitted by the layout engine.

use serde::{Deserialize, Serialize};

use crate::PhotoId;

/// A rectangle in container pixel coordinates.
///
/// `left` may be negative: the grid is shifted left by its centering offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TileRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl TileRect {
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Get the right edge X coordinate.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Get the bottom edge Y coordinate.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Check whether two rectangles share any interior area.
    ///
    /// Rectangles that only touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &TileRect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Compute the smallest rectangle that contains both `self` and `other`.
    #[inline]
    pub fn union(&self, other: &TileRect) -> TileRect {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        TileRect { left, top, width: right - left, height: bottom - top }
    }
}

/// A tile footprint in grid blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub horizontal: usize,
    pub vertical: usize,
}

impl Span {
    #[inline]
    pub const fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }

    /// Number of grid cells covered.
    #[inline]
    pub fn cells(&self) -> usize {
        self.horizontal * self.vertical
    }
}

/// A placed photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhotoTile {
    pub id: PhotoId,
    #[serde(flatten)]
    pub rect: TileRect,
    pub span: Span,
}

/// A filler rectangle covering grid area no photo claimed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderTile {
    #[serde(flatten)]
    pub rect: TileRect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = TileRect::new(-4.0, 10.0, 20.0, 30.0);
        assert_eq!(r.right(), 16.0);
        assert_eq!(r.bottom(), 40.0);
        assert_eq!(r.area(), 600.0);
    }

    #[test]
    fn test_intersects() {
        let a = TileRect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&TileRect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges
        assert!(!a.intersects(&TileRect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&TileRect::new(0.0, 10.0, 10.0, 10.0)));
        // Separated by a gap
        assert!(!a.intersects(&TileRect::new(18.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_union() {
        let a = TileRect::new(0.0, 0.0, 10.0, 10.0);
        let b = TileRect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), TileRect::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_span_cells() {
        assert_eq!(Span::new(3, 5).cells(), 15);
    }

    #[test]
    fn test_photo_tile_json_is_flat() {
        let tile = PhotoTile {
            id: PhotoId(9),
            rect: TileRect::new(-3.0, 0.0, 120.0, 56.0),
            span: Span::new(2, 1),
        };
        let value = serde_json::to_value(tile).unwrap();
        assert_eq!(value["left"], -3.0);
        assert_eq!(value["width"], 120.0);
        assert_eq!(value["span"]["horizontal"], 2);

        let back: PhotoTile = serde_json::from_value(value).unwrap();
        assert_eq!(back, tile);
    }
}
