//! Traffic-derived emission sources
//!
//! Each road segment becomes one point source at its centroid. Source
//! strength is computed from a traffic-density table keyed by road class and
//! a per-vehicle-class emission factor table:
//!
//! ```text
//! Q = Σ_class  count(class) × factor(class) × length_km / 3600   (g/s)
//! ```
//!
//! Unknown road classes degrade to the `"default"` table entry, and a missing
//! default degrades to zero traffic. Zero-length or zero-traffic segments
//! yield `Q = 0` — a contribution of nothing, never an error.

use crate::core_types::geometry::PlanarPoint;
use crate::core_types::units::GramsPerSecond;
use crate::network::{RoadNetwork, RoadSegment};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Traffic table entry used when a road class has no entry of its own.
pub const DEFAULT_ROAD_CLASS: &str = "default";

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Vehicle classes with distinct emission factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Car,
    LightCommercial,
    HeavyTruck,
}

impl VehicleClass {
    /// All classes in a fixed order, so per-segment sums are deterministic.
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::Car,
        VehicleClass::LightCommercial,
        VehicleClass::HeavyTruck,
    ];
}

/// Hourly traffic counts by vehicle class for one road class.
pub type TrafficProfile = FxHashMap<VehicleClass, f64>;

/// Emission model parameters: run inputs, not engine internals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionConfig {
    /// Emission factor per vehicle class (g of pollutant per vehicle-km)
    pub factors_g_per_km: FxHashMap<VehicleClass, f64>,
    /// Hourly traffic counts by road class; must carry a `"default"` entry
    /// for unrecognized classes
    pub traffic: FxHashMap<String, TrafficProfile>,
}

impl EmissionConfig {
    /// Traffic profile for a road class, falling back to the default entry.
    #[must_use]
    pub fn profile_for(&self, road_class: &str) -> Option<&TrafficProfile> {
        self.traffic
            .get(road_class)
            .or_else(|| self.traffic.get(DEFAULT_ROAD_CLASS))
    }

    /// Hourly mass emission of one segment (g/h).
    #[must_use]
    pub fn hourly_emissions_g(&self, segment: &RoadSegment) -> f64 {
        let Some(profile) = self.profile_for(&segment.road_class) else {
            return 0.0;
        };
        let length_km = segment.length.to_kilometers();
        VehicleClass::ALL
            .iter()
            .map(|class| {
                let count = profile.get(class).copied().unwrap_or(0.0);
                let factor = self.factors_g_per_km.get(class).copied().unwrap_or(0.0);
                count * factor * length_km
            })
            .sum()
    }
}

impl Default for EmissionConfig {
    /// Passenger-car NOx calibration for a mixed urban network. Counts are
    /// typical weekday hourly volumes per road class.
    fn default() -> Self {
        let mut factors_g_per_km = FxHashMap::default();
        factors_g_per_km.insert(VehicleClass::Car, 120.0);
        factors_g_per_km.insert(VehicleClass::LightCommercial, 250.0);
        factors_g_per_km.insert(VehicleClass::HeavyTruck, 900.0);

        let car_only = |count: f64| -> TrafficProfile {
            let mut profile = TrafficProfile::default();
            profile.insert(VehicleClass::Car, count);
            profile
        };

        let mut traffic = FxHashMap::default();
        traffic.insert("motorway".to_string(), car_only(3000.0));
        traffic.insert("trunk".to_string(), car_only(2200.0));
        traffic.insert("primary".to_string(), car_only(1500.0));
        traffic.insert("secondary".to_string(), car_only(800.0));
        traffic.insert("tertiary".to_string(), car_only(400.0));
        traffic.insert("residential".to_string(), car_only(200.0));
        traffic.insert("service".to_string(), car_only(50.0));
        traffic.insert(DEFAULT_ROAD_CLASS.to_string(), car_only(500.0));

        EmissionConfig {
            factors_g_per_km,
            traffic,
        }
    }
}

/// A point emission source. Created once per run, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionSource {
    /// Source strength (g/s), always ≥ 0
    pub q: GramsPerSecond,
    /// Source position in the planar frame
    pub position: PlanarPoint,
}

/// Convert one road segment into a point source at its centroid.
#[must_use]
pub fn point_source(segment: &RoadSegment, config: &EmissionConfig) -> EmissionSource {
    let q = config.hourly_emissions_g(segment) / SECONDS_PER_HOUR;
    EmissionSource {
        q: GramsPerSecond::new(q),
        position: segment.centroid,
    }
}

/// Convert every segment of a network into point sources.
#[must_use]
pub fn build_sources(network: &RoadNetwork, config: &EmissionConfig) -> Vec<EmissionSource> {
    network
        .segments
        .iter()
        .map(|segment| point_source(segment, config))
        .collect()
}
