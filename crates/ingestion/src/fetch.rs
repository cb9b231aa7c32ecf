//! Per-file fetch, validation and grading.

use balloon_common::{QualityGrade, SourceFileResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{instrument, warn};

use crate::source::SnapshotSource;
use crate::validate::validate_entry;

/// Fetch one snapshot file, validate every entry and grade the file.
///
/// Every failure mode is absorbed here: transport errors, non-success
/// statuses and non-array bodies all produce an empty result with grade
/// `error`. The consolidation pass never sees a fault from an individual
/// file.
#[instrument(skip(source, observed_at))]
pub async fn fetch_snapshot_file(
    source: &dyn SnapshotSource,
    file_name: &str,
    hours_ago: u32,
    observed_at: DateTime<Utc>,
) -> SourceFileResult {
    let body = match source.fetch_snapshot(file_name).await {
        Ok(body) => body,
        Err(e) => {
            warn!(file = %file_name, error = %e, "Snapshot fetch failed");
            return failed(file_name);
        }
    };

    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(file = %file_name, error = %e, "Snapshot body is not valid JSON");
            return failed(file_name);
        }
    };

    let entries = match raw.as_array() {
        Some(entries) => entries,
        None => {
            warn!(file = %file_name, "Snapshot body is not an array");
            return failed(file_name);
        }
    };

    let total_count = entries.len();
    let mut records = Vec::with_capacity(total_count);
    for (index, entry) in entries.iter().enumerate() {
        if let Some(record) = validate_entry(entry, index, file_name, hours_ago, observed_at) {
            records.push(record);
        }
    }

    let grade = grade_for(records.len(), total_count);

    SourceFileResult {
        file_name: file_name.to_string(),
        records,
        grade,
    }
}

/// Grade a file from its valid/total counts. An empty file grades `error`
/// rather than dividing by zero.
pub fn grade_for(valid_count: usize, total_count: usize) -> QualityGrade {
    if total_count == 0 {
        return QualityGrade::Error;
    }
    QualityGrade::from_success_rate(valid_count as f64 / total_count as f64)
}

fn failed(file_name: &str) -> SourceFileResult {
    SourceFileResult {
        file_name: file_name.to_string(),
        records: Vec::new(),
        grade: QualityGrade::Error,
    }
}
