//! GET /api/balloons - consolidated balloon positions.

use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use balloon_common::ConsolidatedResult;

use crate::state::AppState;

/// Serve the consolidated result, from cache while fresh, otherwise via a
/// (single-flight) consolidation pass.
pub async fn balloons_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Arc<ConsolidatedResult>> {
    Json(state.store.balloons().await)
}
