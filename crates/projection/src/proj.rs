//! Projection dispatch over the concrete implementations.

use crate::error::{ProjResult, ProjectionError};
use crate::laea::LambertAzimuthalEqualArea;
use crate::latlong::LatLong;
use crate::mercator::Mercator;
use crate::params::ProjParams;
use crate::units::{AngleUnit, LengthUnit};

/// A map projection built from a [`ProjParams`] mapping.
///
/// Forward output and inverse input are expressed in the projection's
/// declared linear unit ([`MapProjection::native_unit`]); angular
/// projections keep coordinates in degrees.
#[derive(Debug, Clone)]
pub enum MapProjection {
    LatLong(LatLong),
    LambertAzimuthalEqualArea(LambertAzimuthalEqualArea),
    Mercator(Mercator),
}

impl MapProjection {
    /// Select and build a projection from the `proj` key of a mapping.
    pub fn from_params(params: &ProjParams) -> ProjResult<Self> {
        match params.text("proj") {
            Some("latlong") | Some("longlat") | Some("latlon") | Some("lonlat") => {
                Ok(Self::LatLong(LatLong::from_params(params)?))
            }
            Some("laea") => Ok(Self::LambertAzimuthalEqualArea(
                LambertAzimuthalEqualArea::from_params(params)?,
            )),
            Some("merc") => Ok(Self::Mercator(Mercator::from_params(params)?)),
            Some(other) => Err(ProjectionError::UnsupportedProjection(other.to_string())),
            None => Err(ProjectionError::MissingParameter("proj")),
        }
    }

    /// Whether this is a longitude/latitude projection whose coordinates
    /// are angles rather than lengths.
    pub fn is_angular(&self) -> bool {
        matches!(self, Self::LatLong(_))
    }

    /// The declared linear unit of projected coordinates. Meters for
    /// angular projections, where the unit is never used.
    pub fn native_unit(&self) -> LengthUnit {
        match self {
            Self::LatLong(_) => LengthUnit::METER,
            Self::LambertAzimuthalEqualArea(p) => p.unit,
            Self::Mercator(p) => p.unit,
        }
    }

    /// Forward transform: (lon, lat) in the given angle unit to (x, y)
    /// in the native linear unit. Out-of-domain points are errors.
    pub fn forward(&self, lon: f64, lat: f64, angle: AngleUnit) -> ProjResult<(f64, f64)> {
        let lam = angle.to_radians(lon);
        let phi = angle.to_radians(lat);
        match self {
            Self::LatLong(p) => {
                let (lam, phi) = p.forward(lam, phi)?;
                Ok((lam.to_degrees(), phi.to_degrees()))
            }
            Self::LambertAzimuthalEqualArea(p) => Ok(from_meters(p.forward(lam, phi)?, p.unit)),
            Self::Mercator(p) => Ok(from_meters(p.forward(lam, phi)?, p.unit)),
        }
    }

    /// Inverse transform: (x, y) in the native linear unit to (lon, lat)
    /// in the requested angle unit.
    pub fn inverse(&self, x: f64, y: f64, angle: AngleUnit) -> ProjResult<(f64, f64)> {
        let (lam, phi) = match self {
            Self::LatLong(p) => p.inverse(x.to_radians(), y.to_radians())?,
            Self::LambertAzimuthalEqualArea(p) => {
                let (x, y) = to_meters((x, y), p.unit);
                p.inverse(x, y)?
            }
            Self::Mercator(p) => {
                let (x, y) = to_meters((x, y), p.unit);
                p.inverse(x, y)?
            }
        };
        Ok((angle.from_radians(lam), angle.from_radians(phi)))
    }
}

fn from_meters(xy: (f64, f64), unit: LengthUnit) -> (f64, f64) {
    (
        LengthUnit::convert(xy.0, LengthUnit::METER, unit),
        LengthUnit::convert(xy.1, LengthUnit::METER, unit),
    )
}

fn to_meters(xy: (f64, f64), unit: LengthUnit) -> (f64, f64) {
    (
        LengthUnit::convert(xy.0, unit, LengthUnit::METER),
        LengthUnit::convert(xy.1, unit, LengthUnit::METER),
    )
}
