//! Projection parameter mappings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single value in a projection parameter mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjValue {
    Number(f64),
    Text(String),
    /// A bare flag such as `no_defs`.
    Flag,
}

impl From<f64> for ProjValue {
    fn from(value: f64) -> Self {
        ProjValue::Number(value)
    }
}

impl From<&str> for ProjValue {
    fn from(value: &str) -> Self {
        ProjValue::Text(value.to_string())
    }
}

impl From<String> for ProjValue {
    fn from(value: String) -> Self {
        ProjValue::Text(value)
    }
}

/// The key/value pairs of a projection definition, as produced by an
/// external PROJ-string or CRS parser. Keys are stored without the `+`
/// prefix (`proj`, `lat_0`, `units`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjParams {
    entries: BTreeMap<String, ProjValue>,
}

impl ProjParams {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ProjValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ProjValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw entry lookup.
    pub fn get(&self, key: &str) -> Option<&ProjValue> {
        self.entries.get(key)
    }

    /// Numeric entry lookup. Numeric text such as `"90"` is accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            ProjValue::Number(n) => Some(*n),
            ProjValue::Text(s) => s.parse().ok(),
            ProjValue::Flag => None,
        }
    }

    /// Text entry lookup.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            ProjValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The declared linear unit name, if any.
    pub fn units(&self) -> Option<&str> {
        self.text("units")
    }

    /// Iterate over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProjValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
