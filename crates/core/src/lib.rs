//! Airshed Core Library
//!
//! Street-level pollutant dispersion engine for neighborhood road networks.
//! Converts road-segment traffic into point emission sources, propagates each
//! source's plume over a uniform sampling grid under a rotated-wind Gaussian
//! plume model, applies localized mitigation ("vertical gardens"), and
//! normalizes the aggregated field for visualization.
//!
//! The crate is pure computation: no I/O, no clocks, no global state. One
//! simulation run owns its grid and source set exclusively, so runs are
//! trivially independent. Cell evaluation is parallelized with rayon; results
//! are deterministic up to floating-point rounding.

// Core types and utilities
pub mod core_types;

// Simulation inputs
pub mod emission;
pub mod network;

// Dispersion engine
pub mod grid;
pub mod mitigation;
pub mod plume;

// Coordinate reference seam
pub mod projection;

// Run orchestration
pub mod simulation;

// Re-export core types
pub use core_types::geometry::{BoundingBox, GeoPoint, PlanarPoint};
pub use core_types::units::{Degrees, GramsPerSecond, Meters, MetersPerSecond};
pub use core_types::wind::WindState;

// Re-export model inputs
pub use emission::{EmissionConfig, EmissionSource, VehicleClass};
pub use network::{RoadClassTag, RoadNetwork, RoadSegment};

// Re-export engine types
pub use grid::SamplingGrid;
pub use mitigation::MitigationConfig;
pub use projection::{CoordinateProjector, ProjectionError, UtmProjector};
pub use simulation::{GeoSample, SimulationConfig, SimulationError, SimulationResult};
