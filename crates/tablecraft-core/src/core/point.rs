use serde::{Deserialize, Serialize};

/// A pixel position belonging to the target shape.
///
/// Template points are immutable once a round has started. The order of the
/// points in a template has no effect on scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplatePoint {
    pub x: i32,
    pub y: i32,
}

impl TemplatePoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance from this point to `(x, y)`.
    #[must_use]
    pub fn distance_to(self, x: f64, y: f64) -> f64 {
        (f64::from(self.x) - x).hypot(f64::from(self.y) - y)
    }

    /// Returns `true` if `(x, y)` lies in the square window of half-width
    /// `tolerance` around this point.
    ///
    /// A negative tolerance never matches.
    #[must_use]
    pub fn is_within(self, x: i32, y: i32, tolerance: i32) -> bool {
        let dx = (i64::from(self.x) - i64::from(x)).abs();
        let dy = (i64::from(self.y) - i64::from(y)).abs();
        let tolerance = i64::from(tolerance);
        dx <= tolerance && dy <= tolerance
    }
}
