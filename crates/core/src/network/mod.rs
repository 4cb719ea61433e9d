//! Road network model consumed by the emission stage
//!
//! The network provider (outside this crate) supplies segments already
//! projected into the planar frame, plus the planar bounding box of the
//! network's nodes. Map data frequently carries multi-valued road-class tags
//! (a way split across classifications); [`RoadClassTag`] normalizes those at
//! ingestion by taking the first value — deterministic, if lossy.

use crate::core_types::geometry::{BoundingBox, PlanarPoint};
use crate::core_types::units::Meters;
use serde::{Deserialize, Serialize};

/// Road-class tag as found in map data: a single value or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoadClassTag {
    /// A single classification, e.g. `"residential"`
    Single(String),
    /// Multiple classifications; the first is authoritative
    Multi(Vec<String>),
}

impl RoadClassTag {
    /// The scalar class used for table lookups: the tag itself, or the first
    /// entry of a multi-valued tag. `None` for an empty list.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        match self {
            RoadClassTag::Single(value) => Some(value.as_str()),
            RoadClassTag::Multi(values) => values.first().map(String::as_str),
        }
    }
}

/// One road segment: the unit of emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Normalized road class, e.g. `"primary"` or `"residential"`
    pub road_class: String,
    /// Segment length (m)
    pub length: Meters,
    /// Segment centroid in the planar frame
    pub centroid: PlanarPoint,
}

impl RoadSegment {
    /// Create a new road segment
    #[must_use]
    pub fn new(road_class: impl Into<String>, length: Meters, centroid: PlanarPoint) -> Self {
        RoadSegment {
            road_class: road_class.into(),
            length,
            centroid,
        }
    }
}

/// A projected road network: segments plus the planar bounding box of the
/// underlying nodes (the sampling grid covers the node extent, matching how
/// the map data is bounded rather than the segment centroids).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadNetwork {
    pub segments: Vec<RoadSegment>,
    pub bounds: BoundingBox,
}

impl RoadNetwork {
    /// Create a network from pre-projected segments and node bounds
    #[must_use]
    pub fn new(segments: Vec<RoadSegment>, bounds: BoundingBox) -> Self {
        RoadNetwork { segments, bounds }
    }
}
