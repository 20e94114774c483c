use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Side length in pixels of the table piece image the player stamps onto the canvas.
pub const TABLE_PIECE_SIZE: i32 = 20;

/// A player-created mark, stored as its axis-aligned bounding rectangle.
///
/// The rectangle covers the pixels `x in left..right` and `y in top..bottom`
/// (right and bottom are exclusive). Rectangles with `right <= left` or
/// `bottom <= top` are degenerate and cover no pixels.
///
/// # Example
///
/// ```
/// use tablecraft_core::PlacedPiece;
///
/// let piece = PlacedPiece::centered_at(100, 100, 20);
/// assert_eq!(piece, PlacedPiece::new(90, 90, 110, 110));
/// assert_eq!(piece.area(), 400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PlacedPiece {
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Footprint of a `size`×`size` piece image dropped with its centre at `(x, y)`.
    #[must_use]
    pub const fn centered_at(x: i32, y: i32, size: i32) -> Self {
        let left = x.saturating_sub(size / 2);
        let top = y.saturating_sub(size / 2);
        Self::new(
            left,
            top,
            left.saturating_add(size),
            top.saturating_add(size),
        )
    }

    /// Number of pixel columns covered, zero for degenerate rectangles.
    #[must_use]
    pub fn width(&self) -> u64 {
        u64::try_from(i64::from(self.right) - i64::from(self.left)).unwrap_or(0)
    }

    /// Number of pixel rows covered, zero for degenerate rectangles.
    #[must_use]
    pub fn height(&self) -> u64 {
        u64::try_from(i64::from(self.bottom) - i64::from(self.top)).unwrap_or(0)
    }

    #[must_use]
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.area() == 0
    }

    /// Column range `left..right`; empty for degenerate rectangles.
    #[must_use]
    pub const fn columns(&self) -> Range<i32> {
        self.left..self.right
    }

    /// Row range `top..bottom`; empty for degenerate rectangles.
    #[must_use]
    pub const fn rows(&self) -> Range<i32> {
        self.top..self.bottom
    }

    /// Midpoint of the rectangle.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (
            f64::midpoint(f64::from(self.left), f64::from(self.right)),
            f64::midpoint(f64::from(self.top), f64::from(self.bottom)),
        )
    }
}
