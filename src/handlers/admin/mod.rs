// Admin back-office for the throttling store. Everything here reads or
// mutates live buckets, so the whole group sits behind the bearer-token gate.
use axum::extract::{Path, State};
use serde::Serialize;
use std::time::Instant;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::rate_limit::WindowRecord;
use crate::state::AppState;

/// Wire shape for one bucket. `reset_in_secs` is 0 for records whose window
/// already ended but have not been swept yet.
#[derive(Debug, Serialize)]
pub struct BucketInfo {
    pub identifier: String,
    pub count: u32,
    pub reset_in_secs: u64,
}

impl BucketInfo {
    fn from_record(identifier: String, record: WindowRecord, now: Instant) -> Self {
        Self {
            identifier,
            count: record.count,
            reset_in_secs: record.reset_at.saturating_duration_since(now).as_secs(),
        }
    }
}

/// GET /api/admin/limits - List active rate-limit buckets
pub async fn limits_list(State(state): State<AppState>) -> ApiResult<Vec<BucketInfo>> {
    let now = Instant::now();
    let mut buckets: Vec<BucketInfo> = state
        .store
        .entries()
        .await
        .into_iter()
        .map(|(identifier, record)| BucketInfo::from_record(identifier, record, now))
        .collect();
    buckets.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    Ok(ApiResponse::success(buckets))
}

/// GET /api/admin/limits/:identifier - Inspect a single bucket
pub async fn limits_show(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<BucketInfo> {
    let record = state
        .store
        .get(&identifier)
        .await
        .ok_or_else(|| ApiError::not_found(format!("no bucket for {}", identifier)))?;

    Ok(ApiResponse::success(BucketInfo::from_record(
        identifier,
        record,
        Instant::now(),
    )))
}

/// DELETE /api/admin/limits/:identifier - Reset a bucket
pub async fn limits_reset(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> ApiResult<()> {
    if state.store.remove(&identifier).await {
        tracing::info!(%identifier, "rate limit bucket reset");
        Ok(ApiResponse::<()>::no_content())
    } else {
        Err(ApiError::not_found(format!("no bucket for {}", identifier)))
    }
}
