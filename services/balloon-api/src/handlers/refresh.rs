//! POST /api/refresh - force a fresh consolidation pass.

use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use serde_json::{json, Value};

use crate::state::AppState;

/// Unconditionally invalidate both caches and consolidate from scratch.
pub async fn refresh_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let result = state.store.refresh().await;
    Json(json!({ "success": true, "data": result }))
}
