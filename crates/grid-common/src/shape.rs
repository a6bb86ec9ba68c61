//! Pixel grid shapes and drift-tolerant shape rounding.

use serde::{Deserialize, Serialize};

/// Integer pixel dimensions of a grid as (height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub height: u32,
    pub width: u32,
}

impl GridShape {
    /// Create a new shape from pixel counts.
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    /// Dimensions as floats, for tolerance comparison against derived values.
    pub fn as_floats(&self) -> (f64, f64) {
        (self.height as f64, self.width as f64)
    }
}

/// Result of rounding a fractional shape to integer pixel counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedShape {
    pub shape: GridShape,
    /// True when either dimension deviated from a whole number by more
    /// than the drift epsilon and had to be rounded.
    pub adjusted: bool,
}

/// Fractional deviation below this is treated as floating point drift.
const DRIFT_EPSILON: f64 = 1e-8;
/// Fractional remainders at or above this round up instead of down.
const CEIL_THRESHOLD: f64 = 0.01;

/// Round a possibly fractional (height, width) to integer pixel counts.
///
/// A dimension within `1e-8` of a whole number is taken as-is. Otherwise
/// it is rounded up when its fractional remainder is at least `0.01`
/// and rounded down when the remainder is smaller, so shapes that are
/// nearly integral from accumulated float error are not inflated by a
/// full pixel.
pub fn quantize_shape(height: f64, width: f64) -> QuantizedShape {
    let (height, height_adjusted) = quantize_axis(height);
    let (width, width_adjusted) = quantize_axis(width);
    QuantizedShape {
        shape: GridShape { height, width },
        adjusted: height_adjusted || width_adjusted,
    }
}

fn quantize_axis(value: f64) -> (u32, bool) {
    let mut value = value;
    let mut adjusted = false;
    if (value - value.round()).abs() > DRIFT_EPSILON {
        adjusted = true;
        if value - value.floor() >= CEIL_THRESHOLD {
            value = value.ceil();
        }
    }
    (value.round() as u32, adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_numbers_untouched() {
        let q = quantize_shape(100.0, 200.0);
        assert_eq!(q.shape, GridShape::new(100, 200));
        assert!(!q.adjusted);
    }

    #[test]
    fn test_float_drift_not_flagged() {
        let q = quantize_shape(100.0 + 1e-9, 200.0 - 1e-9);
        assert_eq!(q.shape, GridShape::new(100, 200));
        assert!(!q.adjusted);
    }

    #[test]
    fn test_small_remainder_rounds_down() {
        let q = quantize_shape(100.0049, 200.0);
        assert_eq!(q.shape, GridShape::new(100, 200));
        assert!(q.adjusted);
    }

    #[test]
    fn test_large_remainder_rounds_up() {
        let q = quantize_shape(100.02, 200.0);
        assert_eq!(q.shape, GridShape::new(101, 200));
        assert!(q.adjusted);

        let q = quantize_shape(100.5, 200.0);
        assert_eq!(q.shape, GridShape::new(101, 200));
    }

    #[test]
    fn test_threshold_boundary() {
        // Exactly at the 0.01 threshold the shape rounds up.
        let q = quantize_shape(50.01, 50.0);
        assert_eq!(q.shape, GridShape::new(51, 50));
        assert!(q.adjusted);
    }
}
