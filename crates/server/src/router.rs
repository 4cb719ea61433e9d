//! Axum router construction
//!
//! Assembles the API routes with request tracing and CORS. Origins come from
//! configuration (the map frontend during development); an empty origin list
//! opens CORS up entirely.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;
use crate::state::AppState;

/// Build the complete router:
/// - `GET /api/health` — liveness probe
/// - `POST /api/simulate` — run a simulation
pub fn build_router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(parse_origins(cors_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/simulate", post(handlers::simulate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn parse_origins(origins: &[String]) -> AllowOrigin {
    if origins.is_empty() {
        return AllowOrigin::any();
    }
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(values)
}
