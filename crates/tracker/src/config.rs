//! Tracker configuration.

use serde::{Deserialize, Serialize};

use footfall_core::limits::{
    FAST_INTERACTION_WINDOW_MS, FLUSH_INTERVAL_MS, MAX_SESSION_EVENTS, SESSION_EXPIRY_MS,
};

/// How rows leave the client.
///
/// Proxy mode posts to the site's own relay, which holds the real sink URL.
/// Direct mode posts straight to the sink and is a valid deployment with no
/// endpoint at all (tracking stays local, nothing is enqueued).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DeliveryMode {
    Proxy { url: String },
    Direct { endpoint: Option<String> },
}

impl DeliveryMode {
    /// The URL flushes go to, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Proxy { url } => Some(url),
            Self::Direct { endpoint } => endpoint.as_deref(),
        }
    }
}

impl Default for DeliveryMode {
    fn default() -> Self {
        Self::Direct { endpoint: None }
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub delivery: DeliveryMode,

    /// Interval between periodic flushes (milliseconds).
    #[serde(default = "default_flush_interval_ms")]
    pub flush_interval_ms: u64,

    /// Inactivity window before a session rotates (milliseconds).
    #[serde(default = "default_session_expiry_ms")]
    pub session_expiry_ms: i64,

    /// Maximum events retained on the session record.
    #[serde(default = "default_event_history_cap")]
    pub event_history_cap: usize,

    /// Interactions within this window of page load raise a soft signal
    /// (milliseconds).
    #[serde(default = "default_fast_interaction_window_ms")]
    pub fast_interaction_window_ms: i64,
}

fn default_flush_interval_ms() -> u64 {
    FLUSH_INTERVAL_MS
}

fn default_session_expiry_ms() -> i64 {
    SESSION_EXPIRY_MS
}

fn default_event_history_cap() -> usize {
    MAX_SESSION_EVENTS
}

fn default_fast_interaction_window_ms() -> i64 {
    FAST_INTERACTION_WINDOW_MS
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryMode::default(),
            flush_interval_ms: default_flush_interval_ms(),
            session_expiry_ms: default_session_expiry_ms(),
            event_history_cap: default_event_history_cap(),
            fast_interaction_window_ms: default_fast_interaction_window_ms(),
        }
    }
}

impl TrackerConfig {
    /// Config delivering through the site's relay.
    pub fn proxy(url: impl Into<String>) -> Self {
        Self {
            delivery: DeliveryMode::Proxy { url: url.into() },
            ..Default::default()
        }
    }

    /// Config delivering straight to the sink.
    pub fn direct(endpoint: impl Into<String>) -> Self {
        Self {
            delivery: DeliveryMode::Direct {
                endpoint: Some(endpoint.into()),
            },
            ..Default::default()
        }
    }
}
