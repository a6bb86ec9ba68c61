//! Caller-facing raw parameter types.

use projection::ProjParams;

/// A raw geometric value as supplied by a caller.
///
/// Values may carry an explicit unit tag; untagged values are
/// interpreted in the request-wide unit (see [`AreaParams::units`]).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A single number. Only radius and resolution accept this form;
    /// it is broadcast to both axes.
    Scalar(f64),
    /// A plain numeric sequence.
    Values(Vec<f64>),
    /// A numeric sequence with an attached unit string.
    Tagged {
        values: Vec<f64>,
        units: Option<String>,
    },
}

impl RawValue {
    /// Convenience constructor for a unit-tagged value.
    pub fn tagged(values: impl Into<Vec<f64>>, units: impl Into<String>) -> Self {
        RawValue::Tagged {
            values: values.into(),
            units: Some(units.into()),
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Scalar(value)
    }
}

impl From<Vec<f64>> for RawValue {
    fn from(values: Vec<f64>) -> Self {
        RawValue::Values(values)
    }
}

impl<const N: usize> From<[f64; N]> for RawValue {
    fn from(values: [f64; N]) -> Self {
        RawValue::Values(values.to_vec())
    }
}

/// Everything a caller knows about an area, prior to resolution.
///
/// Mirrors the raw field mapping produced by external area-file
/// parsers: identity fields, the projection parameter mapping, and any
/// subset of the geometric fields. Fields left as `None` are derived
/// from the others where possible.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaParams {
    /// Identifier of the area.
    pub area_id: String,
    /// Human-readable description. Defaults to `area_id`.
    pub description: Option<String>,
    /// Identifier of the projection (legacy).
    pub proj_id: Option<String>,
    /// Projection parameter mapping.
    pub projection: ProjParams,
    /// Request-wide unit for untagged fields. When absent, the
    /// projection's `units` entry applies, then degrees for angular
    /// projections and meters otherwise.
    pub units: Option<String>,
    /// Extent corners (lower-left x, lower-left y, upper-right x, upper-right y).
    pub area_extent: Option<RawValue>,
    /// Pixel counts (height, width).
    pub shape: Option<RawValue>,
    /// Center of the area (x, y).
    pub center: Option<RawValue>,
    /// Half-spans from the center to the extent edges (dx, dy).
    pub radius: Option<RawValue>,
    /// Per-pixel size (dx, dy).
    pub resolution: Option<RawValue>,
    /// Upper-left corner of the upper-left pixel (x, y).
    pub upper_left_extent: Option<RawValue>,
    /// Grid rotation, degrees unless tagged otherwise. Defaults to 0.
    pub rotation: Option<RawValue>,
}

impl AreaParams {
    /// Start a parameter set with just identity and projection.
    pub fn new(area_id: impl Into<String>, projection: ProjParams) -> Self {
        Self {
            area_id: area_id.into(),
            description: None,
            proj_id: None,
            projection,
            units: None,
            area_extent: None,
            shape: None,
            center: None,
            radius: None,
            resolution: None,
            upper_left_extent: None,
            rotation: None,
        }
    }
}
