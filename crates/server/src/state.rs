//! Shared application state
//!
//! One [`AppState`] serves every request: the wind client, the cached
//! network store, and the simulation parameters. Each request still owns its
//! run exclusively — the state only shares providers and configuration.

use airshed_core::simulation::SimulationConfig;

use crate::config::ServerConfig;
use crate::network::NetworkStore;
use crate::weather::WeatherClient;

/// Shared state behind the Axum router.
pub struct AppState {
    pub weather: WeatherClient,
    pub network: NetworkStore,
    pub simulation: SimulationConfig,
}

impl AppState {
    /// Build the application state from configuration.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        AppState {
            weather: WeatherClient::new(
                config.resolved_api_key(),
                config.weather.station.into(),
            ),
            network: NetworkStore::new(config.network.path.clone()),
            simulation: config.simulation.clone(),
        }
    }
}
