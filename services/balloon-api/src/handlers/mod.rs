//! HTTP handlers for the balloon API.

pub mod balloons;
pub mod health;
pub mod refresh;
pub mod weather;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use balloon_common::TrackerError;
use serde_json::json;

/// Request-boundary error producing the `{error, message}` body shape.
#[derive(Debug)]
pub struct ApiError(pub TrackerError);

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            TrackerError::MissingParameter(_) | TrackerError::InvalidParameter { .. } => {
                json!({ "error": self.0.to_string() })
            }
            TrackerError::WeatherUpstream(message) => json!({
                "error": "Failed to fetch weather data",
                "message": message,
            }),
            TrackerError::InternalError(message) => json!({
                "error": "Internal server error",
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
