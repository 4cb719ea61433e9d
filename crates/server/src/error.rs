//! API error types
//!
//! [`ApiError`] unifies the failure modes of the simulate endpoint into a
//! single enum convertible into an HTTP response with a JSON
//! `{error, status}` body. Weather trouble never appears here — the wind
//! client recovers internally.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::network::NetworkError;
use airshed_core::simulation::SimulationError;

/// Errors returned by the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Road network data could not be loaded or projected. Fatal for the
    /// run; no partial result is produced.
    #[error("road network unavailable: {0}")]
    DataUnavailable(#[from] NetworkError),

    /// The simulation run itself failed.
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    /// An internal error occurred (e.g. the worker task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every variant is a server-side failure; the body carries the detail.
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
