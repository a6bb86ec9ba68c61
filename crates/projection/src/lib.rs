//! Coordinate reference system transformations.
//!
//! Implements map projections from scratch without external dependencies.
//! Projections are built from a [`ProjParams`] key/value mapping and
//! expose forward (longitude/latitude to x/y) and inverse transforms in
//! the projection's declared linear unit.

pub mod error;
pub mod laea;
pub mod latlong;
pub mod mercator;
pub mod params;
pub mod proj;
pub mod units;

pub use error::{ProjResult, ProjectionError};
pub use laea::LambertAzimuthalEqualArea;
pub use latlong::LatLong;
pub use mercator::Mercator;
pub use params::{ProjParams, ProjValue};
pub use proj::MapProjection;
pub use units::{AngleUnit, LengthUnit};

/// Default sphere radius in meters, used when a parameter mapping
/// declares neither `R` nor `a`.
pub const DEFAULT_SPHERE_RADIUS: f64 = 6_370_997.0;
