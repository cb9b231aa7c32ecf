//! GET /api/weather - current conditions for a coordinate pair.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::Json;
use balloon_common::{TrackerError, WeatherSample};

use super::ApiError;
use crate::state::AppState;

/// Look up current conditions. Both `lat` and `lon` are required; invalid
/// parameters never reach the upstream provider.
pub async fn weather_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WeatherSample>, ApiError> {
    let latitude = parse_coordinate(&params, "lat", 90.0)?;
    let longitude = parse_coordinate(&params, "lon", 180.0)?;

    let sample = state.store.weather(latitude, longitude).await?;
    Ok(Json(sample))
}

fn parse_coordinate(
    params: &HashMap<String, String>,
    name: &str,
    bound: f64,
) -> Result<f64, TrackerError> {
    let raw = params
        .get(name)
        .ok_or_else(|| TrackerError::MissingParameter(name.to_string()))?;

    let value: f64 = raw.parse().map_err(|_| TrackerError::InvalidParameter {
        param: name.to_string(),
        message: format!("not a number: {}", raw),
    })?;

    if !value.is_finite() || value.abs() > bound {
        return Err(TrackerError::InvalidParameter {
            param: name.to_string(),
            message: format!("out of range: {}", value),
        });
    }

    Ok(value)
}
