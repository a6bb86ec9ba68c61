//! Final grid descriptor construction.

use crate::error::{AreaError, AreaResult};
use crate::raw::AreaParams;
use grid_common::{AreaExtent, GridShape};
use projection::ProjParams;
use serde::{Deserialize, Serialize};

/// A fully specified grid: projection, extent and pixel shape all known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaDefinition {
    pub area_id: String,
    pub description: String,
    pub proj_id: Option<String>,
    pub projection: ProjParams,
    pub shape: GridShape,
    pub area_extent: AreaExtent,
    /// Grid rotation in degrees, negative clockwise.
    pub rotation: f64,
}

/// A partially specified grid: only the extent or only the shape is
/// known, pending later completion from observed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicAreaDefinition {
    pub area_id: String,
    pub description: String,
    pub projection: ProjParams,
    pub shape: Option<GridShape>,
    pub area_extent: Option<AreaExtent>,
    /// Grid rotation in degrees, negative clockwise.
    pub rotation: f64,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridDefinition {
    Fixed(AreaDefinition),
    Dynamic(DynamicAreaDefinition),
}

impl GridDefinition {
    /// The resolved extent, if any.
    pub fn area_extent(&self) -> Option<AreaExtent> {
        match self {
            GridDefinition::Fixed(area) => Some(area.area_extent),
            GridDefinition::Dynamic(area) => area.area_extent,
        }
    }

    /// The resolved shape, if any.
    pub fn shape(&self) -> Option<GridShape> {
        match self {
            GridDefinition::Fixed(area) => Some(area.shape),
            GridDefinition::Dynamic(area) => area.shape,
        }
    }

    /// Whether both extent and shape were resolved.
    pub fn is_fixed(&self) -> bool {
        matches!(self, GridDefinition::Fixed(_))
    }
}

/// Decide the outcome from the final (extent, shape) pair.
pub(crate) fn make_area(
    params: &AreaParams,
    area_extent: Option<AreaExtent>,
    shape: Option<GridShape>,
    rotation: f64,
) -> AreaResult<GridDefinition> {
    let description = params
        .description
        .clone()
        .unwrap_or_else(|| params.area_id.clone());
    match (area_extent, shape) {
        (Some(area_extent), Some(shape)) => Ok(GridDefinition::Fixed(AreaDefinition {
            area_id: params.area_id.clone(),
            description,
            proj_id: params.proj_id.clone(),
            projection: params.projection.clone(),
            shape,
            area_extent,
            rotation,
        })),
        (None, None) => Err(AreaError::InsufficientInformation),
        (area_extent, shape) => Ok(GridDefinition::Dynamic(DynamicAreaDefinition {
            area_id: params.area_id.clone(),
            description,
            projection: params.projection.clone(),
            shape,
            area_extent,
            rotation,
        })),
    }
}
