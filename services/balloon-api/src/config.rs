//! Service configuration from environment variables.

use std::time::Duration as StdDuration;

use chrono::Duration;

/// Runtime configuration for the balloon API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the constellation snapshot provider.
    pub balloon_api_base: String,
    /// Base URL of the weather provider.
    pub weather_api_base: String,
    /// Freshness window for the consolidated balloon result.
    pub balloon_cache_ttl: Duration,
    /// Optional expiry for cached weather samples. None keeps entries until
    /// explicit invalidation (the base policy).
    pub weather_cache_ttl: Option<Duration>,
    /// Per-request timeout for upstream fetches.
    pub request_timeout: StdDuration,
}

impl ApiConfig {
    /// Build configuration from the environment, falling back to the public
    /// upstream endpoints and a 5-minute balloon cache.
    pub fn from_env() -> Self {
        let balloon_api_base = std::env::var("BALLOON_API_BASE")
            .unwrap_or_else(|_| "https://a.windbornesystems.com/treasure".to_string());
        let weather_api_base = std::env::var("WEATHER_API_BASE")
            .unwrap_or_else(|_| "https://api.open-meteo.com/v1/forecast".to_string());

        let balloon_cache_ttl = env_secs("BALLOON_CACHE_TTL_SECS")
            .map(Duration::seconds)
            .unwrap_or_else(|| Duration::minutes(5));
        let weather_cache_ttl = env_secs("WEATHER_CACHE_TTL_SECS").map(Duration::seconds);
        let request_timeout =
            StdDuration::from_secs(env_secs("UPSTREAM_TIMEOUT_SECS").unwrap_or(30) as u64);

        Self {
            balloon_api_base,
            weather_api_base,
            balloon_cache_ttl,
            weather_cache_ttl,
            request_timeout,
        }
    }
}

fn env_secs(name: &str) -> Option<i64> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}
