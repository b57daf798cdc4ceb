//! Relay configuration.

use serde::{Deserialize, Serialize};

use footfall_core::limits::{
    MAX_BODY_BYTES, MAX_FIELD_LEN, MAX_ROWS_PER_BATCH, ROW_STALENESS_MS, SINK_TIMEOUT_SECS,
};

use crate::rate_limit::RateLimitConfig;

/// Relay service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Downstream sink push URL. Absent is a valid deployment state: batches
    /// are acknowledged and dropped so clients never retry forever.
    #[serde(default)]
    pub sink_url: Option<String>,

    /// Rows relayed per request; excess is silently dropped.
    #[serde(default = "default_max_rows_per_batch")]
    pub max_rows_per_batch: usize,

    /// Per-field truncation length (characters).
    #[serde(default = "default_max_field_len")]
    pub max_field_len: usize,

    /// Rows older than this get their timestamp replaced with server time
    /// (milliseconds).
    #[serde(default = "default_staleness_ms")]
    pub staleness_ms: i64,

    /// Maximum accepted request body size (bytes).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Timeout for the server-to-server sink call (seconds).
    #[serde(default = "default_sink_timeout_secs")]
    pub sink_timeout_secs: u64,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_rows_per_batch() -> usize {
    MAX_ROWS_PER_BATCH
}

fn default_max_field_len() -> usize {
    MAX_FIELD_LEN
}

fn default_staleness_ms() -> i64 {
    ROW_STALENESS_MS
}

fn default_max_body_bytes() -> usize {
    MAX_BODY_BYTES
}

fn default_sink_timeout_secs() -> u64 {
    SINK_TIMEOUT_SECS
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sink_url: None,
            max_rows_per_batch: default_max_rows_per_batch(),
            max_field_len: default_max_field_len(),
            staleness_ms: default_staleness_ms(),
            max_body_bytes: default_max_body_bytes(),
            sink_timeout_secs: default_sink_timeout_secs(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}
