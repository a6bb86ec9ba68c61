//! Error types for projection operations.

use thiserror::Error;

/// Result type for projection operations.
pub type ProjResult<T> = std::result::Result<T, ProjectionError>;

/// Errors raised while building or evaluating a projection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    /// The parameter mapping lacks a required key.
    #[error("missing projection parameter: {0}")]
    MissingParameter(&'static str),

    /// The `proj` key names a projection this engine does not implement.
    #[error("unsupported projection: {0}")]
    UnsupportedProjection(String),

    /// The `units` key names a linear unit outside the recognized table.
    #[error("unknown linear unit: {0}")]
    UnknownUnit(String),

    /// A latitude outside [-90, 90] degrees was passed to a transform.
    #[error("latitude {0} is out of range")]
    LatitudeOutOfRange(f64),

    /// The point has no finite image under this projection.
    #[error("point cannot be projected: {0}")]
    OutOfDomain(String),
}
