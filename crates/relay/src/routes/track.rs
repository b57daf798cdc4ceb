//! Track endpoint handler.
//!
//! Accepts `{"rows": [...]}` from the tracker, validates and sanitizes the
//! batch, and relays it to the configured sink. An unconfigured sink is a
//! valid deployment state: the batch is acknowledged and dropped so clients
//! never retry indefinitely.

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde_json::Value;
use telemetry::metrics;
use tracing::{debug, info, warn};

use footfall_core::RowBatch;

use crate::extractors::ClientIp;
use crate::response::{ApiError, TrackResponse};
use crate::sanitize::sanitize_batch;
use crate::state::AppState;

/// POST /track - batch ingestion endpoint.
pub async fn track_handler(
    State(state): State<AppState>,
    ClientIp(client_ip): ClientIp,
    body: Bytes,
) -> Result<Json<TrackResponse>, ApiError> {
    metrics().batches_received.inc();

    let rate_key = client_ip.unwrap_or_else(|| "unknown".to_string());
    if !state.rate_limiter.check(&rate_key) {
        metrics().rate_limited_requests.inc();
        return Err(ApiError::rate_limited("too many requests"));
    }

    // Check payload size before parsing
    if body.len() > state.config.max_body_bytes {
        return Err(ApiError::bad_request(format!(
            "payload size {}KB exceeds {}KB limit",
            body.len() / 1024,
            state.config.max_body_bytes / 1024
        )));
    }

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON: {e}")))?;

    let rows = payload
        .get("rows")
        .and_then(Value::as_array)
        .filter(|rows| !rows.is_empty())
        .ok_or_else(|| ApiError::bad_request("rows array required"))?;

    metrics().rows_received.inc_by(rows.len() as u64);
    debug!(client_ip = %rate_key, rows = rows.len(), "received batch");

    let Some(sink) = &state.sink else {
        metrics().rows_dropped.inc_by(rows.len() as u64);
        debug!(rows = rows.len(), "sink not configured, batch dropped");
        return Ok(Json(TrackResponse::dropped(
            "sink not configured, batch dropped",
        )));
    };

    let excess = rows.len().saturating_sub(state.config.max_rows_per_batch);
    if excess > 0 {
        warn!(excess, cap = state.config.max_rows_per_batch, "batch over row cap, excess dropped");
        metrics().rows_dropped.inc_by(excess as u64);
    }

    let clean = sanitize_batch(rows, &state.config, Utc::now());
    let accepted = clean.len();

    sink.push(&RowBatch { rows: clean }).await.map_err(|e| {
        warn!(error = %e, "sink relay failed");
        metrics().sink_errors.inc();
        ApiError::from(e)
    })?;

    metrics().rows_relayed.inc_by(accepted as u64);
    info!(rows = accepted, "batch relayed");

    Ok(Json(TrackResponse::accepted(accepted)))
}
