//! Airshed HTTP boundary
//!
//! Everything the pure engine ([`airshed_core`]) must not know about lives
//! here: the Axum API surface, the OpenWeatherMap wind client with its
//! documented fallback, the file-backed road-network store with
//! modification-time caching, and the Overpass map fetcher that produces the
//! network file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod osm;
pub mod router;
pub mod server;
pub mod state;
pub mod weather;

pub use config::ServerConfig;
pub use error::ApiError;
pub use network::{NetworkDocument, NetworkError, NetworkStore};
pub use state::AppState;
pub use weather::WeatherClient;
