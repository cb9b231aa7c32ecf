//! Weather lookups from the Open-Meteo current conditions endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use balloon_common::{Clock, TrackerError, TrackerResult, WeatherSample};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Trait for providers of current conditions at a coordinate pair.
///
/// Unlike snapshot fetches, weather failures are not absorbed: there is no
/// substitute value, so the error propagates to the request boundary.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> TrackerResult<WeatherSample>;
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}

/// Weather provider backed by the Open-Meteo forecast API.
pub struct OpenMeteoProvider {
    client: Client,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl OpenMeteoProvider {
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        clock: Arc<dyn Clock>,
    ) -> TrackerResult<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TrackerError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            clock,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self))]
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> TrackerResult<WeatherSample> {
        let url = format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,wind_speed_10m,wind_direction_10m&forecast_days=1",
            self.base_url, latitude, longitude
        );

        debug!(url = %url, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TrackerError::WeatherUpstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TrackerError::WeatherUpstream(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let parsed: WeatherResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::WeatherUpstream(format!("Malformed weather response: {}", e)))?;

        Ok(WeatherSample {
            latitude,
            longitude,
            temperature: parsed.current.temperature_2m,
            wind_speed: parsed.current.wind_speed_10m,
            wind_direction: parsed.current.wind_direction_10m,
            timestamp: self.clock.now(),
        })
    }
}
