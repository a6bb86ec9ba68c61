//! Priority-ordered extrapolation of extent and shape.
//!
//! One forward pass over a fixed chain of derivation rules, each
//! guarded by availability of its inputs and each result checked
//! against any caller-supplied value for the same field. The pass never
//! iterates to a fixed point: an extent found by a late rule cannot
//! retroactively enable an earlier rule, which keeps behavior
//! predictable for redundant or conflicting input.

use crate::convert::{convert_field, UnitContext};
use crate::diag::DiagnosticSink;
use crate::error::{AreaError, AreaResult, FieldName};
use crate::normalize::Normalized;
use crate::quantize::round_shape;
use grid_common::{allclose, AreaExtent, GridShape};

/// Fields known at solver entry. Positions (extent, center, upper-left)
/// arrive already converted to native units; the spans (radius,
/// resolution) arrive normalized but unconverted, because their angular
/// form needs a center that may itself be derived inside the pass.
pub(crate) struct SolverInput<'a> {
    pub area_extent: Option<AreaExtent>,
    pub shape: Option<GridShape>,
    pub center: Option<(f64, f64)>,
    pub radius: Option<&'a Normalized>,
    pub resolution: Option<&'a Normalized>,
    pub upper_left_extent: Option<(f64, f64)>,
}

/// Solver state threaded through the derivation rules. Rules consume a
/// state and return a new one; nothing is mutated in place.
#[derive(Debug, Clone, Copy, Default)]
struct State {
    extent: Option<AreaExtent>,
    shape: Option<GridShape>,
    center: Option<(f64, f64)>,
    radius: Option<(f64, f64)>,
    resolution: Option<(f64, f64)>,
    upper_left: Option<(f64, f64)>,
}

/// Run the fixed derivation chain. Rules, in order:
///
/// 1. extent → center, radius, upper-left corner
/// 2. upper-left corner + center → radius
/// 3. angular resolution → native units (needs whichever center is known)
/// 4. radius + resolution → shape
/// 5. resolution + shape → radius
/// 6. center + radius → extent
/// 7. upper-left corner + radius → extent
///
/// Returns the final (extent, shape); either may still be `None`.
pub(crate) fn extrapolate(
    input: SolverInput<'_>,
    ctx: &UnitContext<'_>,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<(Option<AreaExtent>, Option<GridShape>)> {
    let state = State {
        extent: input.area_extent,
        shape: input.shape,
        center: input.center,
        radius: None,
        resolution: None,
        upper_left: input.upper_left_extent,
    };
    let state = derive_positional(state, input.radius, ctx, sink)?;
    let state = convert_resolution(state, input.resolution, ctx, sink)?;
    let state = derive_shape(state, sink)?;
    let state = derive_extent(state)?;
    Ok((state.extent, state.shape))
}

/// Rules 1 and 2: seed center, radius and upper-left from the extent,
/// or radius from the corner-to-center offset. The radius conversion
/// happens here in every branch because it needs the freshest center.
fn derive_positional(
    state: State,
    raw_radius: Option<&Normalized>,
    ctx: &UnitContext<'_>,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<State> {
    let mut next = state;
    if let Some(extent) = state.extent {
        next.center = Some(validate_pair(
            FieldName::Center,
            state.center,
            extent.center(),
            &[FieldName::AreaExtent],
        )?);
        let radius = convert_field(FieldName::Radius, raw_radius, ctx, next.center, false, sink)?;
        next.radius = Some(validate_pair(
            FieldName::Radius,
            radius,
            extent.half_extent(),
            &[FieldName::AreaExtent],
        )?);
        next.upper_left = Some(validate_pair(
            FieldName::UpperLeftExtent,
            state.upper_left,
            extent.upper_left(),
            &[FieldName::AreaExtent],
        )?);
    } else if let (Some(upper_left), Some(center)) = (state.upper_left, state.center) {
        let radius = convert_field(FieldName::Radius, raw_radius, ctx, state.center, false, sink)?;
        next.radius = Some(validate_pair(
            FieldName::Radius,
            radius,
            (center.0 - upper_left.0, upper_left.1 - center.1),
            &[FieldName::UpperLeftExtent, FieldName::Center],
        )?);
    } else {
        next.radius = convert_field(FieldName::Radius, raw_radius, ctx, state.center, false, sink)?;
    }
    Ok(next)
}

/// Rule 3: bring resolution into native units, using whichever center
/// is now known. An angular resolution with no derivable center fails.
fn convert_resolution(
    state: State,
    raw_resolution: Option<&Normalized>,
    ctx: &UnitContext<'_>,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<State> {
    let mut next = state;
    next.resolution = convert_field(
        FieldName::Resolution,
        raw_resolution,
        ctx,
        state.center,
        false,
        sink,
    )?;
    Ok(next)
}

/// Rules 4 and 5: shape from radius and resolution, or radius from
/// resolution and shape.
fn derive_shape(state: State, sink: &mut dyn DiagnosticSink) -> AreaResult<State> {
    let mut next = state;
    if let (Some(radius), Some(resolution)) = (state.radius, state.resolution) {
        let derived = round_shape(
            2.0 * radius.1 / resolution.1,
            2.0 * radius.0 / resolution.0,
            Some((radius, resolution)),
            sink,
        )?;
        next.shape = Some(validate_shape(
            state.shape,
            derived,
            &[FieldName::Radius, FieldName::Resolution],
        )?);
    } else if let (Some(resolution), Some(shape)) = (state.resolution, state.shape) {
        next.radius = Some(validate_pair(
            FieldName::Radius,
            state.radius,
            (
                resolution.0 * shape.width as f64 / 2.0,
                resolution.1 * shape.height as f64 / 2.0,
            ),
            &[FieldName::Shape, FieldName::Resolution],
        )?);
    }
    Ok(next)
}

/// Rules 6 and 7: extent from center and radius, or from the upper-left
/// corner and radius.
fn derive_extent(state: State) -> AreaResult<State> {
    let mut next = state;
    if let (Some(center), Some(radius)) = (state.center, state.radius) {
        next.extent = Some(validate_extent(
            state.extent,
            AreaExtent::from_center_radius(center, radius),
            &[FieldName::Center, FieldName::Radius],
        )?);
    } else if let (Some(upper_left), Some(radius)) = (state.upper_left, state.radius) {
        next.extent = Some(validate_extent(
            state.extent,
            AreaExtent::from_upper_left_radius(upper_left, radius),
            &[FieldName::UpperLeftExtent, FieldName::Radius],
        )?);
    }
    Ok(next)
}

/// Keep a supplied pair when it agrees with the derived one, adopt the
/// derived pair when nothing was supplied, and fail on disagreement.
fn validate_pair(
    field: FieldName,
    supplied: Option<(f64, f64)>,
    derived: (f64, f64),
    sources: &[FieldName],
) -> AreaResult<(f64, f64)> {
    match supplied {
        None => Ok(derived),
        Some(supplied) => {
            if allclose(&[supplied.0, supplied.1], &[derived.0, derived.1]) {
                Ok(supplied)
            } else {
                Err(AreaError::conflict(
                    field,
                    sources,
                    &[supplied.0, supplied.1],
                    &[derived.0, derived.1],
                ))
            }
        }
    }
}

fn validate_extent(
    supplied: Option<AreaExtent>,
    derived: AreaExtent,
    sources: &[FieldName],
) -> AreaResult<AreaExtent> {
    match supplied {
        None => Ok(derived),
        Some(supplied) => {
            if allclose(&supplied.as_array(), &derived.as_array()) {
                Ok(supplied)
            } else {
                Err(AreaError::conflict(
                    FieldName::AreaExtent,
                    sources,
                    &supplied.as_array(),
                    &derived.as_array(),
                ))
            }
        }
    }
}

fn validate_shape(
    supplied: Option<GridShape>,
    derived: GridShape,
    sources: &[FieldName],
) -> AreaResult<GridShape> {
    match supplied {
        None => Ok(derived),
        Some(supplied) => {
            let (h, w) = supplied.as_floats();
            let (dh, dw) = derived.as_floats();
            if allclose(&[h, w], &[dh, dw]) {
                Ok(supplied)
            } else {
                Err(AreaError::conflict(
                    FieldName::Shape,
                    sources,
                    &[h, w],
                    &[dh, dw],
                ))
            }
        }
    }
}
