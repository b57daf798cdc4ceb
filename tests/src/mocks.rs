//! Mock implementations for testing.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use footfall_core::{Error, Result, RowBatch};
use relay::Sink;
use tracker::Transport;

/// Mock sink that captures relayed batches in memory.
///
/// Implements the same `Sink` trait as the real `HttpSink`, so tests can
/// verify the exact rows that would be forwarded downstream without a
/// network endpoint.
#[derive(Clone, Default)]
pub struct MockSink {
    batches: Arc<Mutex<Vec<RowBatch>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batches pushed through this sink.
    pub fn batches(&self) -> Vec<RowBatch> {
        self.batches.lock().clone()
    }

    /// Total rows across all pushed batches.
    pub fn row_count(&self) -> usize {
        self.batches.lock().iter().map(|b| b.rows.len()).sum()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().len()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl Sink for MockSink {
    async fn push(&self, batch: &RowBatch) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::sink_rejected(503, "mock sink unavailable", 200));
        }
        self.batches.lock().push(batch.clone());
        Ok(())
    }
}

/// Mock transport capturing the tracker's outbound batches.
///
/// Awaited sends and detached (fire-and-forget) sends are recorded
/// separately so tests can tell the two delivery paths apart.
#[derive(Clone, Default)]
pub struct MockTransport {
    sent: Arc<Mutex<Vec<RowBatch>>>,
    detached: Arc<Mutex<Vec<RowBatch>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_batches(&self) -> Vec<RowBatch> {
        self.sent.lock().clone()
    }

    pub fn detached_batches(&self) -> Vec<RowBatch> {
        self.detached.lock().clone()
    }

    /// Event names across awaited batches, in transmission order.
    pub fn sent_events(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .flat_map(|b| b.rows.iter().map(|r| r.event.clone()))
            .collect()
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, batch: &RowBatch) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::transport("mock network failure"));
        }
        self.sent.lock().push(batch.clone());
        Ok(())
    }

    fn send_detached(&self, batch: RowBatch) {
        // Recorded but never acknowledged; this path has no feedback channel.
        self.detached.lock().push(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_sink_captures_batches() {
        let sink = MockSink::new();
        sink.push(&RowBatch::default()).await.unwrap();
        assert_eq!(sink.batch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_sink_failure_mode() {
        let sink = MockSink::new();
        sink.set_should_fail(true);
        assert!(sink.push(&RowBatch::default()).await.is_err());
        assert_eq!(sink.batch_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_transport_separates_paths() {
        let transport = MockTransport::new();
        transport.send(&RowBatch::default()).await.unwrap();
        transport.send_detached(RowBatch::default());
        assert_eq!(transport.sent_batches().len(), 1);
        assert_eq!(transport.detached_batches().len(), 1);
    }
}
