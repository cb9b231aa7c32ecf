//! In-memory caches for consolidated balloon data and weather samples.

use std::collections::HashMap;
use std::sync::Arc;

use balloon_common::{weather_cache_key, Clock, ConsolidatedResult, WeatherSample};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;

/// Single-slot cache for the consolidated balloon result.
///
/// A stale slot is a miss: the old value is discarded, never served.
pub struct BalloonCache {
    slot: RwLock<Option<StoredResult>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

struct StoredResult {
    value: Arc<ConsolidatedResult>,
    stored_at: DateTime<Utc>,
}

impl BalloonCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    /// Return the stored result while it is younger than the TTL.
    pub async fn get(&self) -> Option<Arc<ConsolidatedResult>> {
        let slot = self.slot.read().await;
        let stored = slot.as_ref()?;

        if self.clock.now() - stored.stored_at < self.ttl {
            Some(Arc::clone(&stored.value))
        } else {
            debug!("Balloon cache entry expired");
            None
        }
    }

    /// Replace the slot and stamp it with the current time.
    pub async fn set(&self, value: Arc<ConsolidatedResult>) {
        let mut slot = self.slot.write().await;
        *slot = Some(StoredResult {
            value,
            stored_at: self.clock.now(),
        });
    }

    /// Clear the slot so the next `get()` is a guaranteed miss.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }
}

/// Keyed cache for weather samples.
///
/// Entries are keyed by coordinates rounded to a ~1.1 km grid. The base
/// policy keeps entries until invalidation; an optional TTL can be enabled
/// for deployments where indefinite retention is not acceptable.
pub struct WeatherCache {
    entries: RwLock<HashMap<String, StoredSample>>,
    ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

struct StoredSample {
    value: WeatherSample,
    stored_at: DateTime<Utc>,
}

impl WeatherCache {
    pub fn new(ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub async fn get(&self, latitude: f64, longitude: f64) -> Option<WeatherSample> {
        let key = weather_cache_key(latitude, longitude);
        let entries = self.entries.read().await;
        let stored = entries.get(&key)?;

        if let Some(ttl) = self.ttl {
            if self.clock.now() - stored.stored_at >= ttl {
                return None;
            }
        }

        Some(stored.value.clone())
    }

    /// Store a sample under its own (query) coordinates.
    pub async fn set(&self, sample: &WeatherSample) {
        let key = weather_cache_key(sample.latitude, sample.longitude);
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            StoredSample {
                value: sample.clone(),
                stored_at: self.clock.now(),
            },
        );
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Clock that only moves when told to.
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        fn advance(&self, delta: Duration) {
            let mut now = self.0.lock().unwrap();
            *now += delta;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn result(clock: &dyn Clock) -> Arc<ConsolidatedResult> {
        Arc::new(ConsolidatedResult {
            balloons: Vec::new(),
            total_count: 0,
            data_quality: BTreeMap::new(),
            last_updated: clock.now(),
        })
    }

    fn sample(latitude: f64, longitude: f64) -> WeatherSample {
        WeatherSample {
            latitude,
            longitude,
            temperature: 20.0,
            wind_speed: 3.0,
            wind_direction: 180.0,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_balloon_cache_hit_within_ttl() {
        let clock = ManualClock::new();
        let cache = BalloonCache::new(Duration::minutes(5), clock.clone());

        cache.set(result(clock.as_ref())).await;
        clock.advance(Duration::minutes(4));

        assert!(cache.get().await.is_some());
    }

    #[tokio::test]
    async fn test_balloon_cache_miss_after_ttl() {
        let clock = ManualClock::new();
        let cache = BalloonCache::new(Duration::minutes(5), clock.clone());

        cache.set(result(clock.as_ref())).await;
        clock.advance(Duration::minutes(6));

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_balloon_cache_empty_is_miss() {
        let clock = ManualClock::new();
        let cache = BalloonCache::new(Duration::minutes(5), clock);

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_balloon_cache_invalidate_forces_miss() {
        let clock = ManualClock::new();
        let cache = BalloonCache::new(Duration::minutes(5), clock.clone());

        cache.set(result(clock.as_ref())).await;
        cache.invalidate().await;

        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn test_weather_cache_persists_without_ttl() {
        let clock = ManualClock::new();
        let cache = WeatherCache::new(None, clock.clone());

        cache.set(&sample(40.12, -73.99)).await;
        clock.advance(Duration::hours(48));

        assert!(cache.get(40.12, -73.99).await.is_some());
    }

    #[tokio::test]
    async fn test_weather_cache_expires_with_ttl() {
        let clock = ManualClock::new();
        let cache = WeatherCache::new(Some(Duration::minutes(10)), clock.clone());

        cache.set(&sample(40.12, -73.99)).await;
        clock.advance(Duration::minutes(9));
        assert!(cache.get(40.12, -73.99).await.is_some());

        clock.advance(Duration::minutes(2));
        assert!(cache.get(40.12, -73.99).await.is_none());
    }

    #[tokio::test]
    async fn test_weather_cache_near_duplicate_queries_share_entry() {
        let clock = ManualClock::new();
        let cache = WeatherCache::new(None, clock);

        cache.set(&sample(40.1201, -73.9899)).await;

        // Same rounded grid cell
        assert!(cache.get(40.1203, -73.9901).await.is_some());
        // Different cell
        assert!(cache.get(40.2, -73.99).await.is_none());
    }

    #[tokio::test]
    async fn test_weather_cache_clear() {
        let clock = ManualClock::new();
        let cache = WeatherCache::new(None, clock);

        cache.set(&sample(1.0, 2.0)).await;
        cache.set(&sample(3.0, 4.0)).await;
        cache.clear().await;

        assert!(cache.get(1.0, 2.0).await.is_none());
        assert!(cache.get(3.0, 4.0).await.is_none());
    }
}
