//! Validation of raw snapshot entries.

use balloon_common::PositionRecord;
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Validate one raw entry from a snapshot file's array.
///
/// Entries are `[lat, lon, alt, ...]` tuples. Anything that is not a numeric
/// triple inside coordinate bounds is dropped; the caller counts drops
/// against the file's quality grade. Nothing is ever raised from here.
///
/// Altitude zero is valid; the bound is inclusive.
pub fn validate_entry(
    entry: &Value,
    index: usize,
    file_name: &str,
    hours_ago: u32,
    observed_at: DateTime<Utc>,
) -> Option<PositionRecord> {
    let items = entry.as_array()?;
    if items.len() < 3 {
        return None;
    }

    let latitude = items[0].as_f64()?;
    let longitude = items[1].as_f64()?;
    let altitude = items[2].as_f64()?;

    if !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
        || altitude < 0.0
    {
        return None;
    }

    Some(PositionRecord {
        id: format!("{}-{}", file_name, index),
        latitude,
        longitude,
        altitude,
        timestamp: observed_at - Duration::hours(hours_ago as i64),
        hours_ago,
        data_source: file_name.to_string(),
    })
}
