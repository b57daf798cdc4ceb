//! Internal metrics collection.
//!
//! In-memory atomic counters for the tracking pipeline, readable as a
//! point-in-time snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Collected metrics for the tracking pipeline.
#[derive(Debug, Default)]
pub struct Metrics {
    // Relay ingestion
    pub batches_received: Counter,
    pub rows_received: Counter,
    pub rows_relayed: Counter,
    pub rows_dropped: Counter,
    pub rate_limited_requests: Counter,
    pub sink_errors: Counter,

    // Tracker delivery
    pub rows_enqueued: Counter,
    pub flushes: Counter,
    pub flush_failures: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            batches_received: self.batches_received.get(),
            rows_received: self.rows_received.get(),
            rows_relayed: self.rows_relayed.get(),
            rows_dropped: self.rows_dropped.get(),
            rate_limited_requests: self.rate_limited_requests.get(),
            sink_errors: self.sink_errors.get(),
            rows_enqueued: self.rows_enqueued.get(),
            flushes: self.flushes.get(),
            flush_failures: self.flush_failures.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub batches_received: u64,
    pub rows_received: u64,
    pub rows_relayed: u64,
    pub rows_dropped: u64,
    pub rate_limited_requests: u64,
    pub sink_errors: u64,
    pub rows_enqueued: u64,
    pub flushes: u64,
    pub flush_failures: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
