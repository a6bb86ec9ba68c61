//! Angle and linear unit handling.

use crate::error::{ProjResult, ProjectionError};
use std::f64::consts::FRAC_PI_2;

/// Angle unit accepted by forward/inverse transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert a value in this unit to radians.
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_radians(),
            AngleUnit::Radians => value,
        }
    }

    /// Convert a value in radians to this unit.
    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value.to_degrees(),
            AngleUnit::Radians => value,
        }
    }

    /// Latitude of the pole expressed in this unit.
    pub fn pole(self) -> f64 {
        match self {
            AngleUnit::Degrees => 90.0,
            AngleUnit::Radians => FRAC_PI_2,
        }
    }
}

/// A linear unit for projected coordinates.
///
/// The factor table follows the PROJ `cs2cs -lu` listing. Converting a
/// projected coordinate between two linear units of the same projection
/// is a pure rescale by the ratio of `to_meter` factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthUnit {
    name: &'static str,
    to_meter: f64,
}

/// Linear units recognized in projection parameter mappings.
const UNITS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("dm", 0.1),
    ("cm", 0.01),
    ("mm", 0.001),
    ("kmi", 1852.0),
    ("in", 0.0254),
    ("ft", 0.3048),
    ("yd", 0.9144),
    ("mi", 1609.344),
    ("fath", 1.8288),
    ("ch", 20.1168),
    ("link", 0.201168),
    ("us-in", 0.025400050800101603),
    ("us-ft", 0.30480060960121924),
    ("us-yd", 0.9144018288036576),
    ("us-ch", 20.11684023368047),
    ("us-mi", 1609.3472186944375),
    ("ind-yd", 0.91439523),
    ("ind-ft", 0.30479841),
    ("ind-ch", 20.11669506),
];

impl LengthUnit {
    /// Plain meters.
    pub const METER: LengthUnit = LengthUnit {
        name: "m",
        to_meter: 1.0,
    };

    /// Look up a linear unit by its PROJ name. Long spellings of meters
    /// are accepted as aliases.
    pub fn from_name(name: &str) -> Option<LengthUnit> {
        let name = match name {
            "meters" | "metres" | "meter" | "metre" => "m",
            other => other,
        };
        UNITS
            .iter()
            .find(|(unit_name, _)| *unit_name == name)
            .map(|&(name, to_meter)| LengthUnit { name, to_meter })
    }

    /// Like [`LengthUnit::from_name`] but fails with an error naming the
    /// unrecognized unit.
    pub fn parse(name: &str) -> ProjResult<LengthUnit> {
        LengthUnit::from_name(name).ok_or_else(|| ProjectionError::UnknownUnit(name.to_string()))
    }

    /// Meters per one of this unit.
    pub fn to_meter(&self) -> f64 {
        self.to_meter
    }

    /// PROJ name of this unit.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rescale a projected coordinate from one linear unit to another.
    pub fn convert(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
        value * from.to_meter / to.to_meter
    }
}
