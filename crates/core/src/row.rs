//! Outbound rows: the sink wire schema.
//!
//! A row is a flat, denormalized snapshot of one event plus the session
//! context at enqueue time. It is built by value, never as a reference into
//! the session record, so later session mutations cannot retroactively
//! change rows already sitting in the delivery queue.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::SessionRecord;

/// The fixed sink schema field set (relay allow-list).
pub const ROW_FIELDS: [&str; 13] = [
    "timestamp",
    "session_id",
    "event",
    "page",
    "device",
    "browser",
    "referrer",
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "scroll_pct",
    "is_bot",
    "extra",
];

/// One row in the sink's fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRow {
    /// ISO-8601 timestamp.
    pub timestamp: String,
    pub session_id: String,
    pub event: String,
    pub page: String,
    pub device: String,
    pub browser: String,
    pub referrer: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub scroll_pct: f64,
    /// `"true"` or `"false"` (the sink schema types this as text).
    pub is_bot: String,
    /// Serialized event payload, opaque past this boundary.
    pub extra: String,
}

impl OutboundRow {
    /// Build a row from the current session state plus one event.
    pub fn snapshot(
        record: &SessionRecord,
        event: &str,
        payload: &Map<String, Value>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            session_id: record.session_id.to_string(),
            event: event.to_string(),
            page: record.current_page.clone(),
            device: record.device.clone(),
            browser: record.browser.clone(),
            referrer: record.referrer.clone(),
            utm_source: record.utm_source.clone(),
            utm_medium: record.utm_medium.clone(),
            utm_campaign: record.utm_campaign.clone(),
            scroll_pct: record.max_scroll_pct as f64,
            // Rows are only ever built for human-classified page loads.
            is_bot: "false".to_string(),
            extra: serialize_payload(payload),
        }
    }
}

/// Serialize the payload defensively; failures degrade to `"{}"` instead of
/// erroring out of the tracking call.
fn serialize_payload(payload: &Map<String, Value>) -> String {
    if payload.is_empty() {
        return "{}".to_string();
    }
    serde_json::to_string(payload).unwrap_or_else(|_| "{}".to_string())
}

/// Wire envelope for a batch: `{"rows": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowBatch {
    pub rows: Vec<OutboundRow>,
}
