//! Delivery queue.
//!
//! An ordered, unbounded in-memory buffer of outbound rows. Draining is a
//! single atomic take of the whole queue, so a flush racing with new
//! enqueues (or with another flush trigger) never splits or duplicates a
//! batch: the loser of the race sees an empty queue and no-ops.

use std::collections::VecDeque;

use parking_lot::Mutex;
use telemetry::metrics;

use footfall_core::OutboundRow;

/// Buffer of rows awaiting transmission.
pub struct DeliveryQueue {
    rows: Mutex<VecDeque<OutboundRow>>,
    /// When no endpoint is configured, enqueue is a no-op.
    enabled: bool,
}

impl DeliveryQueue {
    pub fn new(enabled: bool) -> Self {
        Self {
            rows: Mutex::new(VecDeque::new()),
            enabled,
        }
    }

    /// Append a row. No-op when delivery is not configured.
    pub fn enqueue(&self, row: OutboundRow) {
        if !self.enabled {
            return;
        }
        self.rows.lock().push_back(row);
        metrics().rows_enqueued.inc();
    }

    /// Atomically take the entire queue contents. Rows enqueued after this
    /// call land in a fresh queue and belong to the next flush.
    pub fn drain(&self) -> Vec<OutboundRow> {
        std::mem::take(&mut *self.rows.lock()).into()
    }

    /// Reinsert failed rows at the front, preserving their original order,
    /// so retried rows are sent before anything enqueued since.
    pub fn requeue_front(&self, rows: Vec<OutboundRow>) {
        let mut queue = self.rows.lock();
        for row in rows.into_iter().rev() {
            queue.push_front(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }
}
