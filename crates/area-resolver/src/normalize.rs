//! Field normalization: raw caller values into fixed-arity tuples.

use crate::diag::{Diagnostic, DiagnosticSink};
use crate::error::{AreaError, AreaResult, FieldName};
use crate::quantize::round_shape;
use crate::raw::RawValue;

/// A normalized field: fixed arity, finite numbers, optional unit tag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Normalized {
    pub values: Vec<f64>,
    pub units: Option<String>,
}

impl Normalized {
    /// The field as an (x, y) pair. Only valid for arity-2 fields.
    pub fn pair(&self) -> (f64, f64) {
        (self.values[0], self.values[1])
    }
}

/// Validate and coerce one raw field.
///
/// `None` passes through. A unit tag is unwrapped and recorded; a tag
/// on a unitless field (shape) or a tag without a unit string is a
/// diagnostic, not a failure. A bare scalar is broadcast to both axes
/// for the isotropic fields (radius, resolution) and rejected
/// everywhere else. Shape is rounded to whole pixels as part of
/// normalization. Fails on wrong arity, non-finite elements, or a
/// shape dimension that is not a positive pixel count.
pub(crate) fn verify_field(
    field: FieldName,
    raw: Option<&RawValue>,
    expected: usize,
    sink: &mut dyn DiagnosticSink,
) -> AreaResult<Option<Normalized>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let (mut values, units) = match raw {
        RawValue::Scalar(value) => {
            if !matches!(field, FieldName::Radius | FieldName::Resolution) {
                return Err(AreaError::ScalarNotAllowed { field });
            }
            (vec![*value, *value], None)
        }
        RawValue::Values(values) => (values.clone(), None),
        RawValue::Tagged { values, units } => {
            let units = match units {
                Some(units) if field == FieldName::Shape => {
                    sink.record(Diagnostic::UnitOnUnitlessField { field });
                    None
                }
                Some(units) => Some(units.clone()),
                None => {
                    sink.record(Diagnostic::TaggedWithoutUnits { field });
                    None
                }
            };
            (values.clone(), units)
        }
    };

    for &value in &values {
        if !value.is_finite() {
            return Err(AreaError::NotFinite { field, value });
        }
    }
    if values.len() != expected {
        return Err(AreaError::WrongLength {
            field,
            expected,
            actual: values.len(),
        });
    }

    if field == FieldName::Shape {
        let shape = round_shape(values[0], values[1], None, sink)?;
        values = vec![shape.height as f64, shape.width as f64];
    }

    Ok(Some(Normalized { values, units }))
}
