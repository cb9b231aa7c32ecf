//! Shared types for the balloon-tracker workspace.

pub mod clock;
pub mod error;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::{TrackerError, TrackerResult};
pub use types::{
    snapshot_file_name, weather_cache_key, ConsolidatedResult, PositionRecord, QualityGrade,
    SourceFileResult, WeatherSample, SNAPSHOT_FILE_COUNT,
};
