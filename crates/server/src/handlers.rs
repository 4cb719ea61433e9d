//! REST handlers for the simulation API
//!
//! `POST /api/simulate` accepts a list of intervention points and returns the
//! normalized concentration field as `[lon, lat, value]` triples in row-major
//! grid order. Malformed intervention entries (a missing or non-finite
//! coordinate) are rejected individually with a reported warning; the run
//! proceeds with the well-formed remainder.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use airshed_core::simulation::{self, GeoSample};
use airshed_core::GeoPoint;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /api/simulate`.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    /// Vertical-garden placements; empty means no mitigation
    #[serde(default)]
    pub interventions: Vec<InterventionRequest>,
}

/// One intervention point as supplied by the caller. Fields are optional so
/// a single malformed entry can be rejected without failing the whole body.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct InterventionRequest {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl InterventionRequest {
    /// The entry as a geographic point, or `None` if malformed.
    #[must_use]
    pub fn geo_point(&self) -> Option<GeoPoint> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(GeoPoint::new(lat, lng))
            }
            _ => None,
        }
    }
}

/// Partition intervention entries into usable points, warning per rejected
/// entry.
#[must_use]
pub fn collect_interventions(entries: &[InterventionRequest]) -> Vec<GeoPoint> {
    let mut points = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.geo_point() {
            Some(point) => points.push(point),
            None => warn!(index, "rejecting malformed intervention entry"),
        }
    }
    points
}

/// `GET /api/health` — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/simulate` — run one dispersion-and-mitigation simulation.
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<Vec<GeoSample>>, ApiError> {
    info!(
        interventions = request.interventions.len(),
        "simulation requested"
    );

    // Wind and network are fetched once, before any grid computation. The
    // wind client recovers internally; a network failure is fatal.
    let wind = state.weather.current_wind().await;
    let snapshot = state.network.load().await?;
    let points = collect_interventions(&request.interventions);
    let config = state.simulation.clone();

    let result = tokio::task::spawn_blocking(move || {
        simulation::run(
            &snapshot.network,
            wind,
            &points,
            &config,
            snapshot.projector.as_ref(),
        )
    })
    .await
    .map_err(|err| ApiError::Internal(format!("simulation task failed: {err}")))??;

    Ok(Json(result.samples))
}
