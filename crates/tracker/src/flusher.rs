//! Flush scheduling and transport dispatch.
//!
//! A flush drains the whole queue in one atomic take and hands the batch to
//! the transport selected by the trigger. Failed awaited sends go back to
//! the queue front for the next cycle; best-effort retry continues
//! indefinitely. Overlapping flush attempts are tolerated: the loser drains
//! an empty queue and does nothing.

use std::sync::Arc;
use std::time::Duration;

use telemetry::metrics;
use tracing::warn;

use footfall_core::RowBatch;

use crate::queue::DeliveryQueue;
use crate::transport::Transport;

/// What caused a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushTrigger {
    /// Periodic timer.
    Timer,
    /// Page visibility transitioned to hidden.
    Hidden,
    /// Page unload.
    Unload,
}

impl FlushTrigger {
    /// Teardown triggers use the fire-and-forget transport.
    pub fn is_teardown(&self) -> bool {
        matches!(self, Self::Hidden | Self::Unload)
    }
}

/// Drains the delivery queue to the transport.
pub struct Flusher {
    queue: Arc<DeliveryQueue>,
    transport: Arc<dyn Transport>,
}

impl Flusher {
    pub fn new(queue: Arc<DeliveryQueue>, transport: Arc<dyn Transport>) -> Self {
        Self { queue, transport }
    }

    /// Flush the current queue contents. Rows enqueued while transmission is
    /// in flight belong to the next flush.
    pub async fn flush(&self, trigger: FlushTrigger) {
        if trigger.is_teardown() {
            self.flush_detached();
            return;
        }

        let rows = self.queue.drain();
        if rows.is_empty() {
            return;
        }
        metrics().flushes.inc();

        let batch = RowBatch { rows };
        if let Err(e) = self.transport.send(&batch).await {
            warn!(rows = batch.rows.len(), error = %e, "flush failed, requeuing for retry");
            metrics().flush_failures.inc();
            self.queue.requeue_front(batch.rows);
        }
    }

    /// Unload-safe path: initiation must complete before page teardown, so
    /// the batch is handed off fire-and-forget. No feedback, no requeue.
    pub fn flush_detached(&self) {
        let rows = self.queue.drain();
        if rows.is_empty() {
            return;
        }
        metrics().flushes.inc();
        self.transport.send_detached(RowBatch { rows });
    }

    /// Start the periodic flush task.
    pub fn start_timer(self: &Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        let flusher = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it so the first
            // flush happens one full interval after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                flusher.flush(FlushTrigger::Timer).await;
            }
        })
    }
}
