//! Mercator projection.
//!
//! Spherical form with an optional true-scale latitude (`lat_ts`).
//! The poles have no finite image and are rejected.

use crate::error::{ProjResult, ProjectionError};
use crate::params::ProjParams;
use crate::units::LengthUnit;
use crate::DEFAULT_SPHERE_RADIUS;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// Mercator projection parameters.
#[derive(Debug, Clone)]
pub struct Mercator {
    /// Central longitude in radians.
    pub lon_0: f64,
    /// Sphere radius in meters.
    pub r: f64,
    /// Scale factor from the true-scale latitude.
    pub k_0: f64,
    /// Declared linear unit of projected coordinates.
    pub unit: LengthUnit,
}

impl Mercator {
    /// Create a projection from a parameter mapping.
    ///
    /// Reads `lon_0` and `lat_ts` in degrees (default 0), the sphere
    /// radius from `R` or `a` (default [`DEFAULT_SPHERE_RADIUS`]) and
    /// the linear unit from `units` (default meters).
    pub fn from_params(params: &ProjParams) -> ProjResult<Self> {
        let lon_0 = params.number("lon_0").unwrap_or(0.0).to_radians();
        let lat_ts = params.number("lat_ts").unwrap_or(0.0).to_radians();
        let r = params
            .number("R")
            .or_else(|| params.number("a"))
            .unwrap_or(DEFAULT_SPHERE_RADIUS);
        let unit = match params.units() {
            Some(name) => LengthUnit::parse(name)?,
            None => LengthUnit::METER,
        };
        Ok(Self {
            lon_0,
            r,
            k_0: lat_ts.cos(),
            unit,
        })
    }

    /// Forward transform from (lon, lat) in radians to (x, y) in meters.
    pub fn forward(&self, lon: f64, lat: f64) -> ProjResult<(f64, f64)> {
        if lat.abs() >= FRAC_PI_2 - 1e-10 {
            return Err(ProjectionError::OutOfDomain(format!(
                "latitude {} has no finite Mercator image",
                lat.to_degrees()
            )));
        }
        let x = self.r * self.k_0 * (lon - self.lon_0);
        let y = self.r * self.k_0 * (FRAC_PI_4 + lat / 2.0).tan().ln();
        Ok((x, y))
    }

    /// Inverse transform from (x, y) in meters to (lon, lat) in radians.
    pub fn inverse(&self, x: f64, y: f64) -> ProjResult<(f64, f64)> {
        let lon = self.lon_0 + x / (self.r * self.k_0);
        let lat = 2.0 * (y / (self.r * self.k_0)).exp().atan() - FRAC_PI_2;
        Ok((lon, lat))
    }
}
