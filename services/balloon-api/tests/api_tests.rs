//! Handler-level tests for the balloon API, using in-memory upstream
//! sources so no network is involved.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Extension, Query};
use axum::response::IntoResponse;
use balloon_common::{
    Clock, SystemClock, TrackerError, TrackerResult, WeatherSample, SNAPSHOT_FILE_COUNT,
};
use bytes::Bytes;
use chrono::Utc;
use ingestion::consolidate::Consolidator;
use ingestion::source::SnapshotSource;
use ingestion::weather::WeatherProvider;
use serde_json::json;
use storage::{BalloonCache, DataStore, WeatherCache};

use balloon_api::config::ApiConfig;
use balloon_api::handlers;
use balloon_api::state::AppState;

/// Returns the same two-record body for every snapshot file.
struct UniformSource;

#[async_trait]
impl SnapshotSource for UniformSource {
    async fn fetch_snapshot(&self, _file_name: &str) -> anyhow::Result<Bytes> {
        Ok(Bytes::from(
            serde_json::to_vec(&json!([[10.0, 20.0, 1000.0], [30.0, 40.0, 2000.0]])).unwrap(),
        ))
    }
}

struct StaticWeather;

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn fetch_weather(&self, latitude: f64, longitude: f64) -> TrackerResult<WeatherSample> {
        Ok(WeatherSample {
            latitude,
            longitude,
            temperature: 21.5,
            wind_speed: 4.2,
            wind_direction: 135.0,
            timestamp: Utc::now(),
        })
    }
}

struct FailingWeather;

#[async_trait]
impl WeatherProvider for FailingWeather {
    async fn fetch_weather(&self, _: f64, _: f64) -> TrackerResult<WeatherSample> {
        Err(TrackerError::WeatherUpstream(
            "HTTP 503 Service Unavailable".to_string(),
        ))
    }
}

fn test_state(weather: Arc<dyn WeatherProvider>) -> Arc<AppState> {
    let config = ApiConfig::from_env();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let store = DataStore::new(
        BalloonCache::new(config.balloon_cache_ttl, Arc::clone(&clock)),
        WeatherCache::new(config.weather_cache_ttl, Arc::clone(&clock)),
        Consolidator::new(Arc::new(UniformSource), Arc::clone(&clock)),
        weather,
    );

    Arc::new(AppState { store, config })
}

#[tokio::test]
async fn test_balloons_handler_returns_consolidated_result() {
    let state = test_state(Arc::new(StaticWeather));

    let response = handlers::balloons::balloons_handler(Extension(state)).await;
    let result = &response.0;

    assert_eq!(result.total_count, 2 * SNAPSHOT_FILE_COUNT);
    assert_eq!(result.total_count, result.balloons.len());
    assert_eq!(result.data_quality.len(), SNAPSHOT_FILE_COUNT);
}

#[tokio::test]
async fn test_balloons_wire_format() {
    let state = test_state(Arc::new(StaticWeather));

    let response = handlers::balloons::balloons_handler(Extension(state)).await;
    let body = serde_json::to_value(&response.0).unwrap();

    assert!(body["totalCount"].is_u64());
    assert!(body["lastUpdated"].is_string());
    assert_eq!(body["dataQuality"]["00.json"], "healthy");
    assert_eq!(body["balloons"][0]["dataSource"], "00.json");
}

#[tokio::test]
async fn test_weather_handler_success() {
    let state = test_state(Arc::new(StaticWeather));
    let params: HashMap<String, String> = [("lat", "40.7"), ("lon", "-74.0")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let response = handlers::weather::weather_handler(Extension(state), Query(params))
        .await
        .unwrap();

    assert_eq!(response.0.latitude, 40.7);
    assert_eq!(response.0.longitude, -74.0);
    assert_eq!(response.0.temperature, 21.5);
}

#[tokio::test]
async fn test_weather_handler_missing_params_is_400() {
    let state = test_state(Arc::new(StaticWeather));

    let err = handlers::weather::weather_handler(Extension(state), Query(HashMap::new()))
        .await
        .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status(), 400);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_weather_handler_upstream_failure_is_500() {
    let state = test_state(Arc::new(FailingWeather));
    let params: HashMap<String, String> = [("lat", "10.0"), ("lon", "20.0")]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let err = handlers::weather::weather_handler(Extension(state), Query(params))
        .await
        .unwrap_err();

    let response = err.into_response();
    assert_eq!(response.status(), 500);

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Failed to fetch weather data");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_refresh_handler_returns_fresh_data() {
    let state = test_state(Arc::new(StaticWeather));

    let first = handlers::balloons::balloons_handler(Extension(Arc::clone(&state))).await;
    let first_updated = first.0.last_updated;

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = handlers::refresh::refresh_handler(Extension(state)).await;
    let body = response.0;

    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["totalCount"].as_u64().unwrap() as usize,
        2 * SNAPSHOT_FILE_COUNT
    );

    let refreshed: chrono::DateTime<Utc> =
        serde_json::from_value(body["data"]["lastUpdated"].clone()).unwrap();
    assert!(refreshed > first_updated);
}
