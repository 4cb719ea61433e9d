//! End-to-end API tests: the simulate endpoint against a real network file
//! on disk, with fallback wind (no API key configured).

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use airshed_server::config::ServerConfig;
use airshed_server::router::build_router;
use airshed_server::state::AppState;

fn write_network_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("airshed-api-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let document = serde_json::json!({
        "nodes": [
            {"id": 1, "lat": 23.2405, "lon": 72.5035},
            {"id": 2, "lat": 23.2415, "lon": 72.5035},
            {"id": 3, "lat": 23.2415, "lon": 72.5045},
        ],
        "ways": [
            {"id": 10, "nodes": [1, 2], "highway": "primary"},
            {"id": 11, "nodes": [2, 3], "highway": ["residential", "service"]},
        ]
    });
    std::fs::write(&path, serde_json::to_vec(&document).unwrap()).unwrap();
    path
}

fn test_router(network_path: PathBuf, resolution: usize) -> axum::Router {
    let mut config = ServerConfig::default();
    config.network.path = network_path;
    config.weather.api_key = None;
    config.simulation.grid_resolution = resolution;
    let state = Arc::new(AppState::from_config(&config));
    build_router(state, &config.cors_origins)
}

async fn post_simulate(router: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/simulate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_simulate_returns_grid_of_triples() {
    let router = test_router(write_network_file("grid.json"), 8);
    let (status, body) = post_simulate(router, "{}").await;

    assert_eq!(status, StatusCode::OK);
    let samples = body.as_array().expect("response must be an array");
    assert_eq!(samples.len(), 64);

    for sample in samples {
        let triple = sample.as_array().unwrap();
        assert_eq!(triple.len(), 3);
        let lon = triple[0].as_f64().unwrap();
        let lat = triple[1].as_f64().unwrap();
        let value = triple[2].as_f64().unwrap();
        assert!((72.50..72.51).contains(&lon), "lon {lon}");
        assert!((23.24..23.25).contains(&lat), "lat {lat}");
        assert!((0.0..=1.0).contains(&value), "value {value}");
    }
}

#[tokio::test]
async fn test_simulate_accepts_interventions_and_skips_malformed() {
    let router = test_router(write_network_file("interventions.json"), 6);
    let body = r#"{"interventions": [
        {"lat": 23.2410, "lng": 72.5040},
        {"lat": 23.2411},
        {"lng": 72.5041}
    ]}"#;
    let (status, value) = post_simulate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value.as_array().unwrap().len(), 36);
}

#[tokio::test]
async fn test_missing_network_file_is_data_unavailable() {
    let router = test_router(PathBuf::from("/nonexistent/airshed.json"), 6);
    let (status, body) = post_simulate(router, "{}").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("network"), "got {message}");
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = test_router(write_network_file("health.json"), 4);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
