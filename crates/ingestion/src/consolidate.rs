//! The consolidation pass: 24 concurrent snapshot fetches merged into one
//! consistent result.

use std::collections::BTreeMap;
use std::sync::Arc;

use balloon_common::{
    snapshot_file_name, Clock, ConsolidatedResult, QualityGrade, SNAPSHOT_FILE_COUNT,
};
use tracing::{error, info, instrument};

use crate::fetch::fetch_snapshot_file;
use crate::source::SnapshotSource;

/// Runs full consolidation passes against a snapshot source.
pub struct Consolidator {
    source: Arc<dyn SnapshotSource>,
    clock: Arc<dyn Clock>,
}

impl Consolidator {
    pub fn new(source: Arc<dyn SnapshotSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Run one full fetch-validate-merge cycle.
    ///
    /// All 24 fetches are spawned together so wall-clock time is bounded by
    /// the slowest file, and joined without fail-fast. A file that fails, or
    /// a task that panics, contributes zero records with grade `error` and
    /// never disturbs the other slots. The quality map always carries all 24
    /// file keys, and `last_updated` is stamped at completion of the pass.
    #[instrument(skip(self))]
    pub async fn consolidate(&self) -> ConsolidatedResult {
        let observed_at = self.clock.now();

        let handles: Vec<_> = (0..SNAPSHOT_FILE_COUNT as u32)
            .map(|hours_ago| {
                let source = Arc::clone(&self.source);
                let file_name = snapshot_file_name(hours_ago);
                tokio::spawn(async move {
                    fetch_snapshot_file(source.as_ref(), &file_name, hours_ago, observed_at).await
                })
            })
            .collect();

        let outcomes = futures::future::join_all(handles).await;

        let mut balloons = Vec::new();
        let mut data_quality = BTreeMap::new();

        for (index, outcome) in outcomes.into_iter().enumerate() {
            let file_name = snapshot_file_name(index as u32);
            match outcome {
                Ok(result) => {
                    data_quality.insert(file_name, result.grade);
                    balloons.extend(result.records);
                }
                Err(e) => {
                    // Fetch tasks absorb their own failures, so this only
                    // fires on a panicked or cancelled task.
                    error!(file = %file_name, error = %e, "Snapshot task failed");
                    data_quality.insert(file_name, QualityGrade::Error);
                }
            }
        }

        let total_count = balloons.len();
        let result = ConsolidatedResult {
            balloons,
            total_count,
            data_quality,
            last_updated: self.clock.now(),
        };

        info!(
            total = result.total_count,
            healthy = result
                .data_quality
                .values()
                .filter(|g| **g == QualityGrade::Healthy)
                .count(),
            "Consolidation pass complete"
        );

        result
    }
}
