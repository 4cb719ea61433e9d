//! Planar and geographic coordinate types
//!
//! The engine works in two frames: a projected planar frame (meters, used for
//! all dispersion math) and WGS84 geographic coordinates (used at the
//! boundaries — intervention placement and result output). Conversion between
//! the two goes through [`crate::projection::CoordinateProjector`].

use serde::{Deserialize, Serialize};

/// A point in the projected planar coordinate reference system, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPoint {
    /// Easting (m)
    pub x: f64,
    /// Northing (m)
    pub y: f64,
}

impl PlanarPoint {
    /// Create a new planar point
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        PlanarPoint { x, y }
    }

    /// Euclidean distance to another point (m)
    #[inline]
    #[must_use]
    pub fn distance_to(&self, other: PlanarPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }

    /// Midpoint between two points
    #[inline]
    #[must_use]
    pub fn midpoint(&self, other: PlanarPoint) -> PlanarPoint {
        PlanarPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A WGS84 geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north
    pub lat: f64,
    /// Longitude in degrees, positive east
    pub lon: f64,
}

impl GeoPoint {
    /// Create a new geographic point
    #[inline]
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    /// Whether both coordinates are finite numbers
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Axis-aligned planar bounding box, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a bounding box from explicit bounds
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Tight bounding box of a point set, or `None` for an empty set
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = PlanarPoint>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = BoundingBox::new(first.x, first.y, first.x, first.y);
        for p in points {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    /// Width along the x axis (m)
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height along the y axis (m)
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
