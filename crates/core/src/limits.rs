//! Reference constants for the tracking pipeline.
//!
//! These are the default values for every knob the configuration surface
//! exposes. Both the tracker and the relay read their defaults from here so
//! the two sides of the wire stay in agreement.

// === Session ===

/// Inactivity window after which a stored session is rotated (30 minutes).
pub const SESSION_EXPIRY_MS: i64 = 30 * 60 * 1000;

/// Maximum events retained in the session record.
///
/// The event list is truncated to the most recent N on every append, so the
/// record stays bounded no matter how long a visitor stays on the page.
pub const MAX_SESSION_EVENTS: usize = 200;

// === Bot heuristics ===

/// Interactions this soon after page load raise a soft signal (milliseconds).
///
/// Humans essentially never click within the first second; automation
/// routinely does. Advisory only, never a classification.
pub const FAST_INTERACTION_WINDOW_MS: i64 = 800;

// === Delivery ===

/// Interval between periodic queue flushes (10 seconds).
pub const FLUSH_INTERVAL_MS: u64 = 10_000;

// === Relay ===

/// Maximum rows relayed per request; excess rows are silently dropped.
pub const MAX_ROWS_PER_BATCH: usize = 100;

/// Every sanitized field is truncated to this many characters.
pub const MAX_FIELD_LEN: usize = 500;

/// Rows older than this have their timestamp replaced with server time
/// (1 hour).
pub const ROW_STALENESS_MS: i64 = 3_600_000;

/// Maximum request body size accepted by the relay (1MB).
///
/// Prevents memory spikes from oversized requests; a full batch of 100 rows
/// with every field at the length cap is well under this.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Sink diagnostic detail is truncated to this many characters before being
/// surfaced to the caller.
pub const MAX_SINK_DETAIL_LEN: usize = 200;

/// Timeout for the server-to-server sink call (seconds).
pub const SINK_TIMEOUT_SECS: u64 = 5;
