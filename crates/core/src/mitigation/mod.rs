//! Localized mitigation ("vertical gardens")
//!
//! Each intervention subtracts a fixed capture amount from every grid cell
//! within a fixed radius of its planar location, clamped at zero. Passes run
//! sequentially and independently over the already-updated grid, so
//! overlapping radii compound; the clamp applies after every pass, not once
//! at the end — once a cell hits zero, later overlapping passes take nothing
//! further from it.

use crate::core_types::geometry::PlanarPoint;
use crate::core_types::units::{GramsPerSecond, Meters};
use crate::grid::SamplingGrid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Mitigation parameters: simulation-wide constants, not per-site values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MitigationConfig {
    /// Effect radius around each intervention (m)
    pub radius: Meters,
    /// Concentration removed per pass inside the radius
    pub capture_rate: GramsPerSecond,
}

impl Default for MitigationConfig {
    /// Vertical-garden calibration: a 30 m effect radius capturing 0.5 g/s.
    fn default() -> Self {
        MitigationConfig {
            radius: Meters::new(30.0),
            capture_rate: GramsPerSecond::new(0.5),
        }
    }
}

/// Apply one subtraction pass per intervention site. An empty site list is
/// the identity.
pub fn apply(grid: &mut SamplingGrid, sites: &[PlanarPoint], config: &MitigationConfig) {
    if sites.is_empty() {
        return;
    }
    debug!(sites = sites.len(), radius = *config.radius, "applying mitigation passes");
    let radius = *config.radius;
    let capture = *config.capture_rate;
    for site in sites {
        grid.update_cells(|point, value| {
            if point.distance_to(*site) <= radius {
                (value - capture).max(0.0)
            } else {
                value
            }
        });
    }
}
