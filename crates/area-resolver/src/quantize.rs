//! Shape rounding with diagnostics.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::{AreaError, AreaResult, FieldName};
use grid_common::{quantize_shape, GridShape};

/// Round a fractional (height, width) to whole pixels, reporting any
/// real rounding through the diagnostic sink. Dimensions that are not
/// positive, or too large for a pixel count, are errors rather than
/// something to saturate away.
///
/// When the shape came from radius and resolution, pass them as
/// `spans = (radius, resolution)` so the diagnostic can report the
/// resolution implied by the rounded shape. The rewritten resolution is
/// informational only; it does not feed back into the solver.
pub(crate) fn round_shape(
    height: f64,
    width: f64,
    spans: Option<((f64, f64), (f64, f64))>,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<GridShape> {
    for value in [height, width] {
        if value <= 0.0 || value > u32::MAX as f64 {
            return Err(AreaError::InvalidDimension {
                field: FieldName::Shape,
                value,
            });
        }
    }
    let quantized = quantize_shape(height, width);
    if quantized.adjusted {
        let adjusted_resolution = spans.map(|(radius, _resolution)| {
            (
                2.0 * radius.0 / quantized.shape.width as f64,
                2.0 * radius.1 / quantized.shape.height as f64,
            )
        });
        sink.record(Diagnostic::ShapeRounded {
            requested: (height, width),
            rounded: quantized.shape,
            adjusted_resolution,
        });
    }
    Ok(quantized.shape)
}
