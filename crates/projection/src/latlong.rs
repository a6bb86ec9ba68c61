//! Geographic (longitude/latitude) pseudo-projection.
//!
//! An angular projection: coordinates stay in degrees and no
//! angle-to-length conversion is meaningful.

use crate::error::{ProjResult, ProjectionError};
use crate::params::ProjParams;
use std::f64::consts::FRAC_PI_2;

/// Longitude/latitude identity projection.
#[derive(Debug, Clone, Default)]
pub struct LatLong;

impl LatLong {
    /// Build from a parameter mapping. No parameters are required; any
    /// `units` entry is ignored because coordinates are angular.
    pub fn from_params(_params: &ProjParams) -> ProjResult<Self> {
        Ok(LatLong)
    }

    /// Forward transform: validates the latitude and returns the point
    /// unchanged, in radians.
    pub fn forward(&self, lon: f64, lat: f64) -> ProjResult<(f64, f64)> {
        check_latitude(lat)?;
        Ok((lon, lat))
    }

    /// Inverse transform: validates the latitude and returns the point
    /// unchanged, in radians.
    pub fn inverse(&self, lon: f64, lat: f64) -> ProjResult<(f64, f64)> {
        check_latitude(lat)?;
        Ok((lon, lat))
    }
}

fn check_latitude(lat: f64) -> ProjResult<()> {
    if lat.abs() > FRAC_PI_2 + 1e-10 {
        return Err(ProjectionError::LatitudeOutOfRange(lat.to_degrees()));
    }
    Ok(())
}
