//! Core value types shared across the engine

pub mod geometry;
pub mod units;
pub mod wind;

pub use geometry::{BoundingBox, GeoPoint, PlanarPoint};
pub use units::{Degrees, GramsPerSecond, Meters, MetersPerSecond};
pub use wind::WindState;
