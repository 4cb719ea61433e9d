//! Live wind lookup with a documented fallback
//!
//! [`WeatherClient::current_wind`] never fails: a missing API key, transport
//! error, non-2xx status, or absent payload field all degrade to defined
//! values. Absent `wind.speed` / `wind.deg` fields default to 1.0 m/s / 45°,
//! and any request failure yields [`WindState::fallback`] with a warning.
//! Weather trouble must never abort a simulation run.

use airshed_core::core_types::wind::{FALLBACK_WIND_DIRECTION, FALLBACK_WIND_SPEED};
use airshed_core::{GeoPoint, WindState};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// OpenWeatherMap current-weather endpoint.
pub const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Wind provider backed by OpenWeatherMap.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    api_key: Option<String>,
    station: GeoPoint,
}

/// The subset of the weather payload this service reads.
#[derive(Debug, Default, Deserialize)]
struct WeatherPayload {
    #[serde(default)]
    wind: WindPayload,
}

#[derive(Debug, Default, Deserialize)]
struct WindPayload {
    speed: Option<f64>,
    deg: Option<f64>,
}

impl WindPayload {
    fn wind_state(&self) -> WindState {
        WindState::new(
            self.speed.unwrap_or(FALLBACK_WIND_SPEED),
            self.deg.unwrap_or(FALLBACK_WIND_DIRECTION),
        )
    }
}

impl WeatherClient {
    /// Create a client for a fixed lookup point.
    #[must_use]
    pub fn new(api_key: Option<String>, station: GeoPoint) -> Self {
        WeatherClient {
            http: reqwest::Client::new(),
            api_key,
            station,
        }
    }

    /// Current wind at the station. Infallible by contract: every failure
    /// mode degrades to [`WindState::fallback`].
    pub async fn current_wind(&self) -> WindState {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("no weather API key configured, using fallback wind");
            return WindState::fallback();
        };

        match self.fetch(api_key).await {
            Ok(wind) => {
                info!(
                    speed = *wind.speed(),
                    direction = *wind.direction(),
                    "wind reading fetched"
                );
                wind
            }
            Err(err) => {
                warn!(error = %err, "weather lookup failed, using fallback wind");
                WindState::fallback()
            }
        }
    }

    async fn fetch(&self, api_key: &str) -> Result<WindState, reqwest::Error> {
        let payload: WeatherPayload = self
            .http
            .get(OPENWEATHER_ENDPOINT)
            .query(&[
                ("lat", self.station.lat.to_string()),
                ("lon", self.station.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", String::from("metric")),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(payload.wind.wind_state())
    }
}
