//! Non-fatal diagnostics emitted during resolution.
//!
//! Diagnostics are delivered to an injected sink instead of a global
//! logger so callers (and tests) can inspect what a resolution warned
//! about. The default sink forwards to `tracing`.

use crate::error::FieldName;
use grid_common::GridShape;
use std::fmt;

/// A non-fatal finding during resolution. Never aborts the call.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A unit string looks like an angle spelling but is not one of the
    /// recognized angle units, so it is treated as a length.
    SuspiciousUnits { field: FieldName, units: String },

    /// A unit-tagged value arrived without a unit string.
    TaggedWithoutUnits { field: FieldName },

    /// A unit tag was attached to a unitless field (shape).
    UnitOnUnitlessField { field: FieldName },

    /// A fractional shape had to be rounded to whole pixels. When both
    /// radius and resolution were known, `adjusted_resolution` reports
    /// the per-pixel size implied by the rounded shape.
    ShapeRounded {
        requested: (f64, f64),
        rounded: GridShape,
        adjusted_resolution: Option<(f64, f64)>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SuspiciousUnits { field, units } => {
                write!(f, "units provided to {field} are incorrect: {units}")
            }
            Diagnostic::TaggedWithoutUnits { field } => {
                write!(f, "{field} is unit-tagged but does not carry a unit string")
            }
            Diagnostic::UnitOnUnitlessField { field } => {
                write!(f, "{field} is unitless, but was given a unit tag")
            }
            Diagnostic::ShapeRounded {
                requested,
                rounded,
                adjusted_resolution: Some(resolution),
            } => write!(
                f,
                "shape found from radius and resolution does not contain only integers: \
                 {requested:?}; rounding shape to ({}, {}) and resolution to {resolution:?}",
                rounded.height, rounded.width
            ),
            Diagnostic::ShapeRounded {
                requested, rounded, ..
            } => write!(
                f,
                "shape provided does not contain only integers: {requested:?}; \
                 rounding shape to ({}, {})",
                rounded.height, rounded.width
            ),
        }
    }
}

/// Receives diagnostics as they are emitted.
pub trait DiagnosticSink {
    fn record(&mut self, diagnostic: Diagnostic);
}

/// Default sink: forwards every diagnostic to `tracing::warn!`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
    }
}

/// Sink that keeps every diagnostic for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub records: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.records.push(diagnostic);
    }
}
