//! Simulation run orchestration
//!
//! Drives one complete dispersion-and-mitigation run: traffic → sources →
//! grid → plume accumulation → intervention passes → normalization →
//! geographic projection of every cell. The run is pure and synchronous; it
//! owns its grid and source set exclusively.

use crate::core_types::geometry::GeoPoint;
use crate::core_types::wind::WindState;
use crate::emission::{self, EmissionConfig};
use crate::grid::SamplingGrid;
use crate::mitigation::{self, MitigationConfig};
use crate::network::RoadNetwork;
use crate::plume;
use crate::projection::{CoordinateProjector, ProjectionError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Default per-axis sampling resolution.
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// All run parameters in one place. Every table and constant the engine uses
/// is an input here, with defaults matching the urban calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Per-axis sampling resolution `R`; the run produces `R × R` cells
    pub grid_resolution: usize,
    /// Traffic and emission factor tables
    pub emission: EmissionConfig,
    /// Intervention radius and capture rate
    pub mitigation: MitigationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            emission: EmissionConfig::default(),
            mitigation: MitigationConfig::default(),
        }
    }
}

/// One output cell: `(longitude, latitude, normalized concentration)`.
/// Serializes as a three-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoSample(pub f64, pub f64, pub f64);

impl GeoSample {
    /// Longitude in degrees
    #[inline]
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.0
    }

    /// Latitude in degrees
    #[inline]
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.1
    }

    /// Normalized concentration in `[0, 1]`
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.2
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// `R × R` samples in row-major grid order, values in `[0, 1]`
    pub samples: Vec<GeoSample>,
    /// Maximum pre-normalization concentration (g/m³); zero for a run with
    /// no emitting source
    pub peak_concentration: f64,
    /// Number of emission sources derived from the network
    pub source_count: usize,
    /// Interventions actually applied (malformed ones are skipped)
    pub applied_interventions: usize,
}

/// Errors that end a run with no partial result.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A grid cell could not be projected back to geographic coordinates.
    /// The output contract requires every cell, so this is fatal.
    #[error("grid projection failed: {0}")]
    Projection(#[from] ProjectionError),
}

/// Run one dispersion-and-mitigation simulation.
///
/// Interventions are supplied in geographic coordinates and converted once;
/// a point the projector rejects is skipped with a warning and the run
/// proceeds with the remainder. An empty intervention list applies no
/// mitigation.
pub fn run(
    network: &RoadNetwork,
    wind: WindState,
    interventions: &[GeoPoint],
    config: &SimulationConfig,
    projector: &dyn CoordinateProjector,
) -> Result<SimulationResult, SimulationError> {
    let sources = emission::build_sources(network, &config.emission);
    info!(
        segments = network.segments.len(),
        sources = sources.len(),
        resolution = config.grid_resolution,
        wind_speed = *wind.speed(),
        wind_direction = *wind.direction(),
        "starting simulation run"
    );

    let mut grid = SamplingGrid::from_bounds(&network.bounds, config.grid_resolution);
    plume::accumulate(&mut grid, &sources, &wind);

    let mut sites = Vec::with_capacity(interventions.len());
    for (index, point) in interventions.iter().enumerate() {
        match projector.to_planar(*point) {
            Ok(site) => sites.push(site),
            Err(err) => warn!(index, error = %err, "skipping unprojectable intervention"),
        }
    }
    mitigation::apply(&mut grid, &sites, &config.mitigation);

    let peak_concentration = grid.normalize();

    let mut samples = Vec::with_capacity(grid.len());
    for index in 0..grid.len() {
        let geo = projector.to_geographic(grid.point_at(index))?;
        samples.push(GeoSample(geo.lon, geo.lat, grid.value_at(index)));
    }

    info!(
        cells = samples.len(),
        peak_concentration,
        applied_interventions = sites.len(),
        "simulation run complete"
    );

    Ok(SimulationResult {
        samples,
        peak_concentration,
        source_count: sources.len(),
        applied_interventions: sites.len(),
    })
}
