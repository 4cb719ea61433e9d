//! Server configuration
//!
//! Every constant the original deployment hardcoded is a configuration value
//! here: listen address, weather station and API key, network file path, CORS
//! origins, and the full simulation parameter set (tables included). A TOML
//! file overrides any subset; everything else keeps its default.

use airshed_core::simulation::SimulationConfig;
use airshed_core::GeoPoint;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: ListenConfig,
    pub weather: WeatherConfig,
    pub network: NetworkConfig,
    /// Origins allowed by CORS; an empty list allows any origin
    pub cors_origins: Vec<String>,
    pub simulation: SimulationConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen: ListenConfig::default(),
            weather: WeatherConfig::default(),
            network: NetworkConfig::default(),
            cors_origins: Self::default_cors_origins(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// TCP listen address.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        ListenConfig {
            host: String::from("127.0.0.1"),
            port: 5000,
        }
    }
}

/// Wind lookup configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; falls back to the `OPENWEATHER_API_KEY`
    /// environment variable, and with neither the client serves fallback wind
    pub api_key: Option<String>,
    /// Fixed lookup point for the neighborhood
    pub station: StationConfig,
}

/// Geographic point the wind reading is taken at.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub lat: f64,
    pub lon: f64,
}

impl Default for StationConfig {
    fn default() -> Self {
        StationConfig {
            lat: 23.241,
            lon: 72.504,
        }
    }
}

impl From<StationConfig> for GeoPoint {
    fn from(station: StationConfig) -> GeoPoint {
        GeoPoint::new(station.lat, station.lon)
    }
}

/// Road network source file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub path: PathBuf,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            path: PathBuf::from("network.json"),
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Default CORS origins for local development against the map frontend.
    #[must_use]
    pub fn default_cors_origins() -> Vec<String> {
        vec![
            String::from("http://localhost:3000"),
            String::from("http://127.0.0.1:3000"),
        ]
    }

    /// The API key to use: configured value first, then the environment.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.weather
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listen.host, "127.0.0.1");
        assert_eq!(config.listen.port, 5000);
        assert_eq!(config.network.path, PathBuf::from("network.json"));
        assert_eq!(config.simulation.grid_resolution, 50);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ServerConfig = toml::from_str(
            r#"
            [listen]
            port = 8080

            [simulation]
            grid_resolution = 25

            [weather.station]
            lat = 51.5
            lon = -0.12
            "#,
        )
        .unwrap();
        assert_eq!(config.listen.port, 8080);
        assert_eq!(config.listen.host, "127.0.0.1");
        assert_eq!(config.simulation.grid_resolution, 25);
        assert_eq!(config.weather.station.lat, 51.5);
        // Untouched sections keep their defaults
        assert_eq!(config.network.path, PathBuf::from("network.json"));
    }
}
