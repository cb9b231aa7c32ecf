//! Error types for balloon-tracker services.

use thiserror::Error;

/// Result type alias using TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Primary error type for tracker operations.
///
/// Per-record and per-file snapshot failures are absorbed inside the
/// consolidation pipeline and never become a TrackerError; this type covers
/// the failures that do reach the request boundary.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Weather upstream request failed: {0}")]
    WeatherUpstream(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl TrackerError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            TrackerError::MissingParameter(_) | TrackerError::InvalidParameter { .. } => 400,
            TrackerError::WeatherUpstream(_) | TrackerError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::InternalError(format!("JSON error: {}", err))
    }
}
