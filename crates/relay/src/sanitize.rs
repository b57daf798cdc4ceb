//! Row sanitization.
//!
//! Inbound rows are arbitrary JSON. Sanitization maps each one onto the
//! fixed sink schema: unknown keys are dropped, every field is coerced to a
//! bounded string, the scroll percentage is coerced to a number, and stale
//! or unparseable timestamps are replaced with server time rather than
//! rejecting the row (tolerant-but-corrective).

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

use footfall_core::OutboundRow;

use crate::config::RelayConfig;

/// Sanitize a batch, capping it at the configured row limit. Excess rows
/// are silently dropped.
pub fn sanitize_batch(rows: &[Value], config: &RelayConfig, now: DateTime<Utc>) -> Vec<OutboundRow> {
    rows.iter()
        .take(config.max_rows_per_batch)
        .map(|row| sanitize_row(row, config, now))
        .collect()
}

/// Sanitize one row onto the sink schema.
pub fn sanitize_row(row: &Value, config: &RelayConfig, now: DateTime<Utc>) -> OutboundRow {
    let field = |name: &str| coerce_str(row.get(name), config.max_field_len);

    OutboundRow {
        timestamp: sanitize_timestamp(row.get("timestamp"), now, config.staleness_ms),
        session_id: field("session_id"),
        event: field("event"),
        page: field("page"),
        device: field("device"),
        browser: field("browser"),
        referrer: field("referrer"),
        utm_source: field("utm_source"),
        utm_medium: field("utm_medium"),
        utm_campaign: field("utm_campaign"),
        scroll_pct: coerce_scroll(row.get("scroll_pct")),
        is_bot: field("is_bot"),
        extra: field("extra"),
    }
}

/// Coerce any JSON value to a length-bounded string. Missing and null
/// become empty; non-strings keep their JSON rendering.
fn coerce_str(value: Option<&Value>, max_len: usize) -> String {
    let s = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    truncate_chars(s, max_len)
}

fn truncate_chars(s: String, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Coerce the scroll percentage to a finite number, defaulting to 0.
fn coerce_scroll(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Parse the row timestamp; missing, unparseable, or stale values are
/// replaced with the current server time. Accepts RFC 3339 strings and
/// integer epoch milliseconds.
fn sanitize_timestamp(value: Option<&Value>, now: DateTime<Utc>, staleness_ms: i64) -> String {
    let parsed = match value {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    };

    match parsed {
        Some(ts) if now.timestamp_millis() - ts.timestamp_millis() <= staleness_ms => {
            ts.to_rfc3339_opts(SecondsFormat::Millis, true)
        }
        _ => now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}
