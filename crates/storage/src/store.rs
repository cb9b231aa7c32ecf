//! The data store: caches in front of the consolidation pass and the
//! weather provider, with single-flight refresh.

use std::sync::Arc;

use balloon_common::{ConsolidatedResult, TrackerResult, WeatherSample};
use ingestion::consolidate::Consolidator;
use ingestion::weather::WeatherProvider;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{BalloonCache, WeatherCache};

/// Single per-process store serving consolidated balloon data and weather
/// samples. Constructed once and shared by reference with the HTTP handlers.
pub struct DataStore {
    balloon_cache: BalloonCache,
    weather_cache: WeatherCache,
    consolidator: Consolidator,
    weather_provider: Arc<dyn WeatherProvider>,
    /// Serializes consolidation passes so concurrent misses share one
    /// in-flight refresh instead of each hitting upstream.
    refresh_lock: Mutex<()>,
}

impl DataStore {
    pub fn new(
        balloon_cache: BalloonCache,
        weather_cache: WeatherCache,
        consolidator: Consolidator,
        weather_provider: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            balloon_cache,
            weather_cache,
            consolidator,
            weather_provider,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Return the consolidated result, running at most one upstream pass
    /// across all concurrent callers that miss the cache.
    pub async fn balloons(&self) -> Arc<ConsolidatedResult> {
        if let Some(cached) = self.balloon_cache.get().await {
            debug!("Balloon cache hit");
            return cached;
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(cached) = self.balloon_cache.get().await {
            debug!("Balloon cache filled while waiting for refresh lock");
            return cached;
        }

        self.refresh_slot().await
    }

    /// Invalidate everything and run a fresh consolidation pass.
    pub async fn refresh(&self) -> Arc<ConsolidatedResult> {
        let _guard = self.refresh_lock.lock().await;

        self.balloon_cache.invalidate().await;
        self.weather_cache.clear().await;
        info!("Cache invalidated, running fresh consolidation pass");

        self.refresh_slot().await
    }

    /// Clear both caches without refetching.
    pub async fn invalidate(&self) {
        let _guard = self.refresh_lock.lock().await;
        self.balloon_cache.invalidate().await;
        self.weather_cache.clear().await;
    }

    /// Weather lookup with keyed caching. Upstream failures propagate; there
    /// is no substitute weather value.
    pub async fn weather(&self, latitude: f64, longitude: f64) -> TrackerResult<WeatherSample> {
        if let Some(cached) = self.weather_cache.get(latitude, longitude).await {
            debug!("Weather cache hit");
            return Ok(cached);
        }

        let sample = self
            .weather_provider
            .fetch_weather(latitude, longitude)
            .await?;
        self.weather_cache.set(&sample).await;
        Ok(sample)
    }

    async fn refresh_slot(&self) -> Arc<ConsolidatedResult> {
        let result = Arc::new(self.consolidator.consolidate().await);
        self.balloon_cache.set(Arc::clone(&result)).await;
        result
    }
}
