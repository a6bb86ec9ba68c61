//! Error types for area definition resolution.

use std::fmt;
use thiserror::Error;

/// Result type alias for resolution operations.
pub type AreaResult<T> = std::result::Result<T, AreaError>;

/// Geometric fields of an area description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    AreaExtent,
    Shape,
    Center,
    Radius,
    Resolution,
    UpperLeftExtent,
    Rotation,
}

impl FieldName {
    /// The caller-facing parameter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::AreaExtent => "area_extent",
            FieldName::Shape => "shape",
            FieldName::Center => "center",
            FieldName::Radius => "radius",
            FieldName::Resolution => "resolution",
            FieldName::UpperLeftExtent => "upper_left_extent",
            FieldName::Rotation => "rotation",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving an area definition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AreaError {
    // === Arity/type errors ===
    /// A field does not have its required number of elements.
    #[error("{field} should have length {expected}, but instead has length {actual}")]
    WrongLength {
        field: FieldName,
        expected: usize,
        actual: usize,
    },

    /// A field contains a NaN or infinite element.
    #[error("{field} is not composed purely of finite numbers: {value}")]
    NotFinite { field: FieldName, value: f64 },

    /// A single number was given for a field that is not isotropic.
    #[error("{field} is not list-like: a single value is only allowed for radius and resolution")]
    ScalarNotAllowed { field: FieldName },

    /// A shape dimension is not a representable positive pixel count.
    #[error("{field} dimensions must be positive pixel counts: {value}")]
    InvalidDimension { field: FieldName, value: f64 },

    // === Unit errors ===
    /// A length unit was requested on a longitude/latitude projection.
    #[error("latlong projection cannot take length units for {0}")]
    LengthUnitsOnAngularProjection(FieldName),

    /// An angular radius or resolution was given with no derivable center.
    #[error("center must be given to convert {0} from an angle to projection units")]
    AngularSpanWithoutCenter(FieldName),

    /// A rotation tag carried a non-angular unit.
    #[error("units provided to rotation are incorrect: {0}")]
    InvalidRotationUnits(String),

    // === Conflict errors ===
    /// A caller-supplied value disagrees with a value derived from other fields.
    #[error(
        "conflicting {field}: value given does not match value found from {sources}: \
         given {given:?} vs found {derived:?}"
    )]
    Conflict {
        field: FieldName,
        /// Comma-separated names of the fields the derived value came from.
        sources: String,
        given: Vec<f64>,
        derived: Vec<f64>,
    },

    // === Insufficient information ===
    /// Neither extent nor shape could be determined.
    #[error("not enough information provided to create an area definition")]
    InsufficientInformation,

    /// The projection engine rejected the parameters or a point.
    #[error("projection error: {0}")]
    Projection(#[from] projection::ProjectionError),
}

impl AreaError {
    pub(crate) fn conflict(
        field: FieldName,
        sources: &[FieldName],
        given: &[f64],
        derived: &[f64],
    ) -> Self {
        AreaError::Conflict {
            field,
            sources: sources
                .iter()
                .map(FieldName::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            given: given.to_vec(),
            derived: derived.to_vec(),
        }
    }
}
