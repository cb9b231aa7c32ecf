//! Domain types for consolidated balloon data and weather lookups.
//!
//! Wire format matches the public API: camelCase field names, RFC 3339
//! timestamps, lowercase quality grades.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of hourly snapshot files published upstream (`00.json`..`23.json`).
pub const SNAPSHOT_FILE_COUNT: usize = 24;

/// Zero-padded snapshot file name for an age-in-hours index, e.g. `07.json`.
pub fn snapshot_file_name(hours_ago: u32) -> String {
    format!("{:02}.json", hours_ago)
}

/// Cache key for weather lookups: coordinates rounded to 2 decimal places
/// (~1.1 km grid) so near-duplicate queries share one entry.
pub fn weather_cache_key(latitude: f64, longitude: f64) -> String {
    format!("{:.2},{:.2}", latitude, longitude)
}

/// One validated balloon position extracted from a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    /// `"<sourceFileName>-<indexInFile>"`.
    pub id: String,
    /// Degrees, -90..90.
    pub latitude: f64,
    /// Degrees, -180..180.
    pub longitude: f64,
    /// Meters, >= 0.
    pub altitude: f64,
    /// Consolidation-pass time minus the file's age in hours.
    pub timestamp: DateTime<Utc>,
    pub hours_ago: u32,
    /// Snapshot file this record came from.
    pub data_source: String,
}

/// Coarse health indicator for one snapshot file, based on the fraction of
/// records that validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityGrade {
    Healthy,
    Good,
    Partial,
    Error,
}

impl QualityGrade {
    /// Grade for a file given its fraction of valid records. Thresholds are
    /// inclusive lower bounds.
    pub fn from_success_rate(rate: f64) -> Self {
        if rate >= 0.95 {
            QualityGrade::Healthy
        } else if rate >= 0.80 {
            QualityGrade::Good
        } else if rate >= 0.50 {
            QualityGrade::Partial
        } else {
            QualityGrade::Error
        }
    }
}

/// Outcome of fetching and validating one snapshot file. A total fetch
/// failure is represented as zero records with grade `error`, never as a
/// propagated fault.
#[derive(Debug, Clone)]
pub struct SourceFileResult {
    pub file_name: String,
    pub records: Vec<PositionRecord>,
    pub grade: QualityGrade,
}

/// The merged output of one consolidation pass across all 24 snapshot files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedResult {
    /// Records concatenated in file order 00..23, original in-file order.
    pub balloons: Vec<PositionRecord>,
    /// Always equals `balloons.len()`.
    pub total_count: usize,
    /// One entry per snapshot file; zero-padded names keep the map in
    /// file-index order.
    pub data_quality: BTreeMap<String, QualityGrade>,
    /// Completion time of the consolidation pass.
    pub last_updated: DateTime<Utc>,
}

/// Current conditions at a queried coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSample {
    /// The query coordinates, not necessarily a balloon position.
    pub latitude: f64,
    pub longitude: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Meters per second.
    pub wind_speed: f64,
    /// Degrees.
    pub wind_direction: f64,
    pub timestamp: DateTime<Utc>,
}
