//! Rectangular area extents in projected coordinates.

use serde::{Deserialize, Serialize};

/// A rectangular extent in a projection's native coordinate units.
///
/// Corners are (lower-left x, lower-left y, upper-right x, upper-right y).
/// For geographic projections coordinates are degrees, for projected
/// ones they are in the projection's declared linear unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl AreaExtent {
    /// Create a new extent from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Build an extent from a center point and per-axis half-spans.
    pub fn from_center_radius(center: (f64, f64), radius: (f64, f64)) -> Self {
        Self {
            min_x: center.0 - radius.0,
            min_y: center.1 - radius.1,
            max_x: center.0 + radius.0,
            max_y: center.1 + radius.1,
        }
    }

    /// Build an extent from the upper-left corner and per-axis half-spans.
    pub fn from_upper_left_radius(upper_left: (f64, f64), radius: (f64, f64)) -> Self {
        Self {
            min_x: upper_left.0,
            min_y: upper_left.1 - 2.0 * radius.1,
            max_x: upper_left.0 + 2.0 * radius.0,
            max_y: upper_left.1,
        }
    }

    /// Midpoint of the extent.
    pub fn center(&self) -> (f64, f64) {
        ((self.max_x + self.min_x) / 2.0, (self.max_y + self.min_y) / 2.0)
    }

    /// Per-axis half-spans from the center to the extent edges.
    pub fn half_extent(&self) -> (f64, f64) {
        ((self.max_x - self.min_x) / 2.0, (self.max_y - self.min_y) / 2.0)
    }

    /// Upper-left corner of the extent.
    pub fn upper_left(&self) -> (f64, f64) {
        (self.min_x, self.max_y)
    }

    /// Width of the extent in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the extent in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Corner coordinates in (min_x, min_y, max_x, max_y) order.
    pub fn as_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}
