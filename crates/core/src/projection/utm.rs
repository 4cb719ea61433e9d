//! Universal Transverse Mercator projection (WGS84)
//!
//! Ellipsoidal transverse Mercator with the standard UTM parameters
//! (k₀ = 0.9996, 500 km false easting, 10 000 km southern false northing),
//! using the series expansions from:
//!
//! - Snyder, J.P. (1987). "Map Projections — A Working Manual."
//!   U.S. Geological Survey Professional Paper 1395, pp. 60-64.
//!
//! Accuracy is centimeter-level within a zone, which is orders of magnitude
//! below the sampling grid's cell spacing.

use super::{CoordinateProjector, ProjectionError};
use crate::core_types::geometry::{GeoPoint, PlanarPoint};

/// WGS84 semi-major axis (m)
const WGS84_A: f64 = 6378137.0;

/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257223563;

/// UTM central meridian scale factor
const K0: f64 = 0.9996;

/// UTM false easting (m)
const FALSE_EASTING: f64 = 500_000.0;

/// UTM false northing for the southern hemisphere (m)
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// UTM latitude band limit (degrees)
const MAX_LATITUDE: f64 = 84.0;

/// WGS84 UTM projector for a fixed zone and hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmProjector {
    zone: u8,
    south: bool,
}

impl UtmProjector {
    /// Create a projector for an explicit zone (1-60) and hemisphere.
    #[must_use]
    #[track_caller]
    pub fn new(zone: u8, south: bool) -> Self {
        assert!(
            (1..=60).contains(&zone),
            "UtmProjector::new: zone must be in 1..=60"
        );
        UtmProjector { zone, south }
    }

    /// Create a projector for the zone containing a location.
    #[must_use]
    pub fn for_location(geo: GeoPoint) -> Self {
        let zone = ((geo.lon + 180.0) / 6.0).floor() as i32 + 1;
        let zone = zone.clamp(1, 60) as u8;
        UtmProjector::new(zone, geo.lat < 0.0)
    }

    /// UTM zone number (1-60)
    #[inline]
    #[must_use]
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Whether the projector uses the southern false northing
    #[inline]
    #[must_use]
    pub fn is_south(&self) -> bool {
        self.south
    }

    /// Central meridian of the zone, in radians
    fn central_meridian(&self) -> f64 {
        (f64::from(self.zone - 1) * 6.0 - 180.0 + 3.0).to_radians()
    }

    /// Meridional arc length from the equator to latitude `phi` (radians).
    fn meridional_arc(phi: f64) -> f64 {
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        WGS84_A
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

impl CoordinateProjector for UtmProjector {
    fn to_planar(&self, geo: GeoPoint) -> Result<PlanarPoint, ProjectionError> {
        if !geo.is_finite() {
            return Err(ProjectionError::NonFinite(geo.lat, geo.lon));
        }
        if geo.lat.abs() > MAX_LATITUDE {
            return Err(ProjectionError::LatitudeOutOfRange(geo.lat));
        }

        let e2 = WGS84_F * (2.0 - WGS84_F);
        let ep2 = e2 / (1.0 - e2);

        let phi = geo.lat.to_radians();
        let lambda = geo.lon.to_radians();

        let sin_phi = phi.sin();
        let cos_phi = phi.cos();
        let tan_phi = phi.tan();

        let n = WGS84_A / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let a = (lambda - self.central_meridian()) * cos_phi;
        let m = Self::meridional_arc(phi);

        let a2 = a * a;
        let a3 = a2 * a;
        let a4 = a3 * a;
        let a5 = a4 * a;
        let a6 = a5 * a;

        let x = K0
            * n
            * (a + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0)
            + FALSE_EASTING;

        let mut y = K0
            * (m + n
                * tan_phi
                * (a2 / 2.0
                    + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                    + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));
        if self.south {
            y += FALSE_NORTHING_SOUTH;
        }

        Ok(PlanarPoint::new(x, y))
    }

    fn to_geographic(&self, planar: PlanarPoint) -> Result<GeoPoint, ProjectionError> {
        if !(planar.x.is_finite() && planar.y.is_finite()) {
            return Err(ProjectionError::NonFinite(planar.x, planar.y));
        }

        let e2 = WGS84_F * (2.0 - WGS84_F);
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = e2 / (1.0 - e2);

        let x = planar.x - FALSE_EASTING;
        let y = if self.south {
            planar.y - FALSE_NORTHING_SOUTH
        } else {
            planar.y
        };

        // Footpoint latitude from the meridional arc
        let m = y / K0;
        let mu = m / (WGS84_A * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let sqrt_1me2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_1me2) / (1.0 + sqrt_1me2);
        let e1_2 = e1 * e1;
        let e1_3 = e1_2 * e1;
        let e1_4 = e1_3 * e1;

        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1_3 / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1_2 / 16.0 - 55.0 * e1_4 / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1_3 / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1_4 / 512.0) * (8.0 * mu).sin();

        let sin_phi1 = phi1.sin();
        let cos_phi1 = phi1.cos();
        let tan_phi1 = phi1.tan();

        let c1 = ep2 * cos_phi1 * cos_phi1;
        let t1 = tan_phi1 * tan_phi1;
        let denom = 1.0 - e2 * sin_phi1 * sin_phi1;
        let n1 = WGS84_A / denom.sqrt();
        let r1 = WGS84_A * (1.0 - e2) / (denom * denom.sqrt());
        let d = x / (n1 * K0);

        let d2 = d * d;
        let d3 = d2 * d;
        let d4 = d3 * d;
        let d5 = d4 * d;
        let d6 = d5 * d;

        let phi = phi1
            - (n1 * tan_phi1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d4 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1
                        - 252.0 * ep2
                        - 3.0 * c1 * c1)
                        * d6
                        / 720.0);

        let lambda = self.central_meridian()
            + (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
                + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                    * d5
                    / 120.0)
                / cos_phi1;

        Ok(GeoPoint::new(phi.to_degrees(), lambda.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zone_selection() {
        // Zone 43 covers 72°E..78°E
        assert_eq!(UtmProjector::for_location(GeoPoint::new(23.241, 72.504)).zone(), 43);
        // Zone 31 starts at 0°E
        assert_eq!(UtmProjector::for_location(GeoPoint::new(48.8, 2.35)).zone(), 31);
        assert!(!UtmProjector::for_location(GeoPoint::new(23.2, 72.5)).is_south());
        assert!(UtmProjector::for_location(GeoPoint::new(-33.86, 151.2)).is_south());
    }

    #[test]
    fn test_northern_round_trip() {
        let projector = UtmProjector::for_location(GeoPoint::new(23.241, 72.504));
        let geo = GeoPoint::new(23.241, 72.504);
        let planar = projector.to_planar(geo).unwrap();

        // Well inside the zone: easting near the central meridian side,
        // northing ~2570 km for 23.2°N
        assert!(planar.x > 100_000.0 && planar.x < 900_000.0);
        assert!(planar.y > 2_500_000.0 && planar.y < 2_650_000.0);

        let back = projector.to_geographic(planar).unwrap();
        assert_relative_eq!(back.lat, geo.lat, epsilon = 1e-7);
        assert_relative_eq!(back.lon, geo.lon, epsilon = 1e-7);
    }

    #[test]
    fn test_southern_round_trip() {
        let geo = GeoPoint::new(-33.8688, 151.2093);
        let projector = UtmProjector::for_location(geo);
        let planar = projector.to_planar(geo).unwrap();
        assert!(planar.y > 0.0, "southern false northing keeps y positive");

        let back = projector.to_geographic(planar).unwrap();
        assert_relative_eq!(back.lat, geo.lat, epsilon = 1e-7);
        assert_relative_eq!(back.lon, geo.lon, epsilon = 1e-7);
    }

    #[test]
    fn test_local_distances_near_true_scale() {
        // Two points 0.001° of latitude apart: ~110.6 m on the ground
        let projector = UtmProjector::for_location(GeoPoint::new(23.241, 72.504));
        let a = projector.to_planar(GeoPoint::new(23.2410, 72.5040)).unwrap();
        let b = projector.to_planar(GeoPoint::new(23.2420, 72.5040)).unwrap();
        let distance = a.distance_to(b);
        assert!((distance - 110.6).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn test_rejects_polar_latitudes() {
        let projector = UtmProjector::new(33, false);
        assert_eq!(
            projector.to_planar(GeoPoint::new(89.0, 15.0)),
            Err(ProjectionError::LatitudeOutOfRange(89.0))
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let projector = UtmProjector::new(33, false);
        assert!(matches!(
            projector.to_planar(GeoPoint::new(f64::NAN, 15.0)),
            Err(ProjectionError::NonFinite(_, _))
        ));
        assert!(matches!(
            projector.to_geographic(PlanarPoint::new(f64::INFINITY, 0.0)),
            Err(ProjectionError::NonFinite(_, _))
        ));
    }
}
