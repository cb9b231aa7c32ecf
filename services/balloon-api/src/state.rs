//! Application state for the balloon API.

use std::sync::Arc;

use anyhow::Result;
use balloon_common::{Clock, SystemClock};
use ingestion::consolidate::Consolidator;
use ingestion::source::HttpSnapshotSource;
use ingestion::weather::OpenMeteoProvider;
use storage::{BalloonCache, DataStore, WeatherCache};

use crate::config::ApiConfig;

/// Shared application state.
pub struct AppState {
    pub store: DataStore,
    pub config: ApiConfig,
}

impl AppState {
    /// Wire the production store: HTTP snapshot source, Open-Meteo weather
    /// provider, and one cache pair sharing the system clock.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let source = Arc::new(HttpSnapshotSource::new(
            config.balloon_api_base.as_str(),
            config.request_timeout,
        )?);
        let weather_provider = Arc::new(OpenMeteoProvider::new(
            config.weather_api_base.as_str(),
            config.request_timeout,
            Arc::clone(&clock),
        )?);

        let store = DataStore::new(
            BalloonCache::new(config.balloon_cache_ttl, Arc::clone(&clock)),
            WeatherCache::new(config.weather_cache_ttl, Arc::clone(&clock)),
            Consolidator::new(source, Arc::clone(&clock)),
            weather_provider,
        );

        Ok(Self { store, config })
    }
}
