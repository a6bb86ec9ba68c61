//! Resolves complete grid definitions from partial area descriptions.
//!
//! Callers describe a grid through any sufficient mix of extent
//! corners, a center point, a radius, a pixel resolution, a pixel
//! shape, or an upper-left corner, each independently expressed in
//! degrees, radians, or a projected length unit. The resolver
//! normalizes the fields, converts them into the projection's native
//! length units, fills in whatever is missing through a fixed chain of
//! derivation rules, cross-validates every redundant value, and emits
//! either a fully specified [`AreaDefinition`] or a partially specified
//! [`DynamicAreaDefinition`].
//!
//! The engine is stateless and synchronous; independent resolutions can
//! run concurrently without coordination.

mod convert;
pub mod diag;
pub mod dispatch;
pub mod error;
mod normalize;
mod quantize;
pub mod raw;
mod solve;

pub use diag::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use dispatch::{AreaDefinition, DynamicAreaDefinition, GridDefinition};
pub use error::{AreaError, AreaResult, FieldName};
pub use grid_common::{AreaExtent, GridShape};
pub use raw::{AreaParams, RawValue};

use convert::{convert_field, convert_rotation, UnitContext};
use normalize::verify_field;
use projection::MapProjection;
use solve::{extrapolate, SolverInput};

/// Resolve an area description into a grid definition, reporting
/// diagnostics through `tracing`.
pub fn create_area_def(params: &AreaParams) -> AreaResult<GridDefinition> {
    create_area_def_with_sink(params, &mut TracingSink)
}

/// Resolve an area description, delivering non-fatal diagnostics to the
/// given sink.
pub fn create_area_def_with_sink(
    params: &AreaParams,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<GridDefinition> {
    let proj = MapProjection::from_params(&params.projection)?;

    // Unit priority: per-field tag, request-wide unit, the projection's
    // own unit entry, then degrees for angular projections and meters
    // otherwise.
    let default_units = params
        .units
        .clone()
        .or_else(|| params.projection.units().map(str::to_string))
        .unwrap_or_else(|| {
            if proj.is_angular() {
                "degrees".to_string()
            } else {
                "m".to_string()
            }
        });
    let ctx = UnitContext {
        default_units,
        proj: &proj,
    };

    let center = verify_field(FieldName::Center, params.center.as_ref(), 2, sink)?;
    let radius = verify_field(FieldName::Radius, params.radius.as_ref(), 2, sink)?;
    let upper_left = verify_field(
        FieldName::UpperLeftExtent,
        params.upper_left_extent.as_ref(),
        2,
        sink,
    )?;
    let resolution = verify_field(FieldName::Resolution, params.resolution.as_ref(), 2, sink)?;
    let shape = verify_field(FieldName::Shape, params.shape.as_ref(), 2, sink)?;
    let area_extent = verify_field(FieldName::AreaExtent, params.area_extent.as_ref(), 4, sink)?;

    // Positions convert up front; the spans wait for the solver, which
    // may first have to find a center for them.
    let center = convert_field(FieldName::Center, center.as_ref(), &ctx, None, false, sink)?;
    let upper_left = convert_field(
        FieldName::UpperLeftExtent,
        upper_left.as_ref(),
        &ctx,
        None,
        false,
        sink,
    )?;
    // The extent converts corner by corner, both carrying the same tag.
    let area_extent = match &area_extent {
        Some(extent) => {
            let corner = |values: &[f64]| normalize::Normalized {
                values: values.to_vec(),
                units: extent.units.clone(),
            };
            let (min_x, min_y) = convert::convert_pair(
                FieldName::AreaExtent,
                &corner(&extent.values[..2]),
                &ctx,
                None,
                false,
                sink,
            )?;
            let (max_x, max_y) = convert::convert_pair(
                FieldName::AreaExtent,
                &corner(&extent.values[2..]),
                &ctx,
                None,
                false,
                sink,
            )?;
            Some(AreaExtent::new(min_x, min_y, max_x, max_y))
        }
        None => None,
    };
    let shape = shape
        .as_ref()
        .map(|shape| GridShape::new(shape.values[0] as u32, shape.values[1] as u32));
    let rotation = convert_rotation(params.rotation.as_ref(), &ctx.default_units)?;

    let (area_extent, shape) = if area_extent.is_none() || shape.is_none() {
        extrapolate(
            SolverInput {
                area_extent,
                shape,
                center,
                radius: radius.as_ref(),
                resolution: resolution.as_ref(),
                upper_left_extent: upper_left,
            },
            &ctx,
            sink,
        )?
    } else {
        (area_extent, shape)
    };

    dispatch::make_area(params, area_extent, shape, rotation)
}

/// Resolve a batch of independent area descriptions.
///
/// Each area resolves on its own; one failure never blocks or corrupts
/// the others. Callers wanting fail-fast behavior can collect into
/// `Result<Vec<_>, _>` instead.
pub fn create_area_defs<'a>(
    params: impl IntoIterator<Item = &'a AreaParams>,
) -> Vec<AreaResult<GridDefinition>> {
    params.into_iter().map(create_area_def).collect()
}
