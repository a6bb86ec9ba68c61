//! Lambert Azimuthal Equal-Area projection.
//!
//! Spherical form, commonly used for polar grids (EASE) where the
//! projection stays well-behaved at the pole itself.
//!
//! Reference: Snyder, Map Projections - A Working Manual, p. 182-190.

use crate::error::{ProjResult, ProjectionError};
use crate::params::ProjParams;
use crate::units::LengthUnit;
use crate::DEFAULT_SPHERE_RADIUS;

/// Lambert Azimuthal Equal-Area projection parameters.
#[derive(Debug, Clone)]
pub struct LambertAzimuthalEqualArea {
    /// Central longitude in radians.
    pub lon_0: f64,
    /// Central latitude in radians.
    pub lat_0: f64,
    /// Sphere radius in meters.
    pub r: f64,
    /// Declared linear unit of projected coordinates.
    pub unit: LengthUnit,
    /// Sine and cosine of the central latitude.
    sin_lat_0: f64,
    cos_lat_0: f64,
}

impl LambertAzimuthalEqualArea {
    /// Create a projection from a parameter mapping.
    ///
    /// Reads `lon_0` and `lat_0` in degrees (default 0), the sphere
    /// radius from `R` or `a` (default [`DEFAULT_SPHERE_RADIUS`]) and
    /// the linear unit from `units` (default meters).
    pub fn from_params(params: &ProjParams) -> ProjResult<Self> {
        let lon_0 = params.number("lon_0").unwrap_or(0.0).to_radians();
        let lat_0 = params.number("lat_0").unwrap_or(0.0).to_radians();
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
            lat_0,
            r,
            unit,
            sin_lat_0: lat_0.sin(),
            cos_lat_0: lat_0.cos(),
        })
    }

    /// Forward transform from (lon, lat) in radians to (x, y) in meters.
    pub fn forward(&self, lon: f64, lat: f64) -> ProjResult<(f64, f64)> {
        let dlon = lon - self.lon_0;
        let (sin_lat, cos_lat) = lat.sin_cos();
        let denom = 1.0 + self.sin_lat_0 * sin_lat + self.cos_lat_0 * cos_lat * dlon.cos();
        if denom < 1e-11 {
            return Err(ProjectionError::OutOfDomain(format!(
                "point ({}, {}) is antipodal to the projection center",
                lon.to_degrees(),
                lat.to_degrees()
            )));
        }
        let k = (2.0 / denom).sqrt();
        let x = self.r * k * cos_lat * dlon.sin();
        let y = self.r * k * (self.cos_lat_0 * sin_lat - self.sin_lat_0 * cos_lat * dlon.cos());
        Ok((x, y))
    }

    /// Inverse transform from (x, y) in meters to (lon, lat) in radians.
    pub fn inverse(&self, x: f64, y: f64) -> ProjResult<(f64, f64)> {
        let rho = x.hypot(y);
        if rho < 1e-9 {
            return Ok((self.lon_0, self.lat_0));
        }
        let ratio = rho / (2.0 * self.r);
        if ratio > 1.0 {
            return Err(ProjectionError::OutOfDomain(format!(
                "({x}, {y}) lies outside the projection disc"
            )));
        }
        let c = 2.0 * ratio.asin();
        let (sin_c, cos_c) = c.sin_cos();
        let lat = (cos_c * self.sin_lat_0 + y * sin_c * self.cos_lat_0 / rho)
            .clamp(-1.0, 1.0)
            .asin();
        let lon = self.lon_0
            + (x * sin_c).atan2(rho * self.cos_lat_0 * cos_c - y * self.sin_lat_0 * sin_c);
        Ok((lon, lat))
    }
}
