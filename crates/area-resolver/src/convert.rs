//! Projection-aware unit conversion of normalized fields.
//!
//! Converts angle-valued fields into the projection's native length
//! units, including the distance-from-center semantics needed for
//! radius and resolution, and snaps near-pole centers to the exact
//! pole.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::{AreaError, AreaResult, FieldName};
use crate::normalize::Normalized;
use crate::raw::RawValue;
use projection::{AngleUnit, LengthUnit, MapProjection};
use std::f64::consts::{FRAC_PI_2, PI};

/// Centers within this many degrees of ±90° latitude snap to the exact
/// pole. For a polar equal-area projection this admits a positional
/// error of roughly ten meters.
const POLE_SNAP_TOLERANCE_DEG: f64 = 1e-4;

/// Latitudes within this distance of a pole make longitude degenerate
/// for the distance-from-center computation.
const POLE_DEGENERATE_EPS: f64 = 1e-8;

/// The working units and projection handle threaded through every
/// conversion.
pub(crate) struct UnitContext<'a> {
    /// Unit applied to fields that carry no tag of their own.
    pub default_units: String,
    /// The projection engine.
    pub proj: &'a MapProjection,
}

/// Interpretation of a unit string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Degrees,
    Radians,
    Length(LengthUnit),
    /// Unrecognized: treated as the projection's native length unit.
    Native,
}

/// Classify a unit string. Only the four exact spellings count as
/// angles; strings that merely look angular are flagged and treated as
/// lengths.
fn parse_unit(units: &str, field: FieldName, sink: &mut dyn DiagnosticSink) -> Unit {
    match units {
        "deg" | "degrees" => Unit::Degrees,
        "rad" | "radians" => Unit::Radians,
        other => {
            if other.contains("deg") || other.contains("rad") {
                sink.record(Diagnostic::SuspiciousUnits {
                    field,
                    units: other.to_string(),
                });
            }
            match LengthUnit::from_name(other) {
                Some(unit) => Unit::Length(unit),
                None => Unit::Native,
            }
        }
    }
}

/// Convert a normalized 2-element field into the projection's native
/// length units, or into degrees when `inverse` is set.
///
/// `center` is only consulted for the span fields (radius, resolution),
/// whose angular form is measured as a distance from the center rather
/// than projected as a position.
pub(crate) fn convert_field(
    field: FieldName,
    value: Option<&Normalized>,
    ctx: &UnitContext<'_>,
    center: Option<(f64, f64)>,
    inverse: bool,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<Option<(f64, f64)>> {
    match value {
        Some(normalized) => {
            convert_pair(field, normalized, ctx, center, inverse, sink).map(Some)
        }
        None => Ok(None),
    }
}

/// [`convert_field`] for a value known to be present.
pub(crate) fn convert_pair(
    field: FieldName,
    normalized: &Normalized,
    ctx: &UnitContext<'_>,
    center: Option<(f64, f64)>,
    inverse: bool,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<(f64, f64)> {
    let units = normalized.units.as_deref().unwrap_or(&ctx.default_units);
    let unit = parse_unit(units, field, sink);

    if ctx.proj.is_angular() {
        if let Unit::Length(_) = unit {
            return Err(AreaError::LengthUnitsOnAngularProjection(field));
        }
    }

    let mut pair = normalized.pair();

    // A declared linear unit different from the projection's is a pure
    // rescale, the projection being the same on both sides.
    if let Unit::Length(from) = unit {
        let native = ctx.proj.native_unit();
        if from != native {
            pair = (
                LengthUnit::convert(pair.0, from, native),
                LengthUnit::convert(pair.1, from, native),
            );
        }
    }

    if field == FieldName::Center {
        pair = round_poles(pair, unit, ctx.proj)?;
    }

    let angle = match unit {
        Unit::Degrees => Some(AngleUnit::Degrees),
        Unit::Radians => Some(AngleUnit::Radians),
        _ => None,
    };
    pair = match (angle, inverse) {
        (Some(angle), false) => {
            if matches!(field, FieldName::Radius | FieldName::Resolution) {
                distance_from_center(field, pair, center, ctx.proj, angle)?
            } else {
                ctx.proj.forward(pair.0, pair.1, angle)?
            }
        }
        (None, true) => ctx.proj.inverse(pair.0, pair.1, AngleUnit::Degrees)?,
        _ => pair,
    };

    // Spans are magnitudes; direction carries no meaning.
    if matches!(field, FieldName::Radius | FieldName::Resolution) {
        pair = (pair.0.abs(), pair.1.abs());
    }
    Ok(pair)
}

/// Snap a center to the exact pole when it is within tolerance.
///
/// A center in length units cannot be tested against the pole directly,
/// so it is inverse-projected, tested in degrees, and re-projected when
/// it snaps.
fn round_poles(
    center: (f64, f64),
    unit: Unit,
    proj: &MapProjection,
) -> AreaResult<(f64, f64)> {
    match unit {
        Unit::Degrees => Ok(snap_latitude(center, 90.0, POLE_SNAP_TOLERANCE_DEG)),
        Unit::Radians => Ok(snap_latitude(
            center,
            FRAC_PI_2,
            POLE_SNAP_TOLERANCE_DEG * PI / 180.0,
        )),
        Unit::Length(_) | Unit::Native => {
            let (lon, lat) = proj.inverse(center.0, center.1, AngleUnit::Degrees)?;
            if (lat.abs() - 90.0).abs() < POLE_SNAP_TOLERANCE_DEG {
                Ok(proj.forward(lon, sign(lat) * 90.0, AngleUnit::Degrees)?)
            } else {
                Ok(center)
            }
        }
    }
}

fn snap_latitude(center: (f64, f64), pole: f64, tolerance: f64) -> (f64, f64) {
    if (center.1.abs() - pole).abs() < tolerance {
        (center.0, sign(center.1) * pole)
    } else {
        center
    }
}

/// Convert an angular span (radius or resolution) into projection
/// units, measured from the center.
///
/// Equal angular steps are not equal distances away from the poles, so
/// the span is realized as the projected distance between the center
/// and the center offset by the span. On a pole longitude is
/// degenerate and both axes use the distance along latitude away from
/// the pole. Off the pole, positive spans step to the west and south,
/// negative spans to the east and north.
fn distance_from_center(
    field: FieldName,
    span: (f64, f64),
    center: Option<(f64, f64)>,
    proj: &MapProjection,
    angle: AngleUnit,
) -> AreaResult<(f64, f64)> {
    let Some(center) = center else {
        return Err(AreaError::AngularSpanWithoutCenter(field));
    };
    let (center_lon, center_lat) = proj.inverse(center.0, center.1, angle)?;
    let pole = angle.pole();
    if (center_lat.abs() - pole).abs() < POLE_DEGENERATE_EPS {
        let toward_equator = sign(center_lat);
        let dx = center.1
            - proj
                .forward(0.0, center_lat - toward_equator * span.0.abs(), angle)?
                .1;
        let dy = center.1
            - proj
                .forward(0.0, center_lat - toward_equator * span.1.abs(), angle)?
                .1;
        Ok((dx, dy))
    } else {
        let dx = center.0 - proj.forward(center_lon - span.0, center_lat, angle)?.0;
        let dy = center.1 - proj.forward(center_lon, center_lat - span.1, angle)?.1;
        Ok((dx, dy))
    }
}

/// Convert a raw rotation value to degrees. Defaults to 0.
///
/// An explicit unit tag must be angular; untagged rotations follow the
/// request-wide unit and are only rescaled when that unit is radians.
pub(crate) fn convert_rotation(
    raw: Option<&RawValue>,
    default_units: &str,
) -> AreaResult<f64> {
    let Some(raw) = raw else {
        return Ok(0.0);
    };
    let (value, units) = match raw {
        RawValue::Scalar(value) => (*value, default_units.to_string()),
        RawValue::Values(values) => {
            if values.len() != 1 {
                return Err(AreaError::WrongLength {
                    field: FieldName::Rotation,
                    expected: 1,
                    actual: values.len(),
                });
            }
            (values[0], default_units.to_string())
        }
        RawValue::Tagged { values, units } => {
            if values.len() != 1 {
                return Err(AreaError::WrongLength {
                    field: FieldName::Rotation,
                    expected: 1,
                    actual: values.len(),
                });
            }
            let units = units.clone().unwrap_or_else(|| default_units.to_string());
            if !matches!(units.as_str(), "deg" | "degrees" | "rad" | "radians") {
                return Err(AreaError::InvalidRotationUnits(units));
            }
            (values[0], units)
        }
    };
    if !value.is_finite() {
        return Err(AreaError::NotFinite {
            field: FieldName::Rotation,
            value,
        });
    }
    if matches!(units.as_str(), "rad" | "radians") {
        Ok(value.to_degrees())
    } else {
        Ok(value)
    }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}
