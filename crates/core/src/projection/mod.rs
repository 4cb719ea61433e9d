//! Coordinate reference seam
//!
//! The engine computes in a projected planar frame but talks to the outside
//! world in WGS84. [`CoordinateProjector`] is the seam: intervention points
//! cross it inbound, grid cells cross it outbound. The crate ships a UTM
//! implementation ([`UtmProjector`]); callers with a different CRS substitute
//! their own.

pub mod utm;

pub use utm::UtmProjector;

use crate::core_types::geometry::{GeoPoint, PlanarPoint};

/// Errors from coordinate conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProjectionError {
    /// Latitude outside the projection's valid band.
    #[error("latitude {0}° is outside the transverse Mercator domain (±84°)")]
    LatitudeOutOfRange(f64),

    /// A coordinate was NaN or infinite.
    #[error("coordinate is not finite: ({0}, {1})")]
    NonFinite(f64, f64),
}

/// Bidirectional conversion between the planar frame and WGS84.
pub trait CoordinateProjector: Send + Sync {
    /// Project a geographic point into the planar frame.
    fn to_planar(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjectionError>;

    /// Project a planar point back to geographic coordinates.
    fn to_geographic(&self, planar: PlanarPoint) -> Result<GeoPoint, ProjectionError>;
}
