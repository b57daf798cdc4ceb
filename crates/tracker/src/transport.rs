//! Outbound transports.
//!
//! Two delivery paths share one endpoint: an awaited POST with failure
//! feedback (timer-driven flushes), and a detached fire-and-forget POST for
//! page teardown, where only initiation is guaranteed and there is no
//! feedback channel.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use footfall_core::limits::{MAX_SINK_DETAIL_LEN, SINK_TIMEOUT_SECS};
use footfall_core::{Error, Result, RowBatch};

/// Batch delivery to the configured endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Awaited delivery; a non-2xx answer or network failure is an error the
    /// flusher uses to requeue the batch.
    async fn send(&self, batch: &RowBatch) -> Result<()>;

    /// Fire-and-forget delivery for the teardown path. Must return
    /// immediately once transmission has been initiated.
    fn send_detached(&self, batch: RowBatch);
}

/// HTTP transport posting `{"rows": [...]}` as JSON.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(SINK_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, batch: &RowBatch) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(batch)
            .send()
            .await
            .map_err(|e| Error::transport(format!("failed to reach endpoint: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::sink_rejected(status, &body, MAX_SINK_DETAIL_LEN));
        }

        Ok(())
    }

    fn send_detached(&self, batch: RowBatch) {
        let client = self.client.clone();
        let url = self.url.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&batch).send().await {
                Ok(response) => {
                    debug!(status = %response.status(), rows = batch.rows.len(), "detached flush sent")
                }
                Err(e) => debug!(error = %e, "detached flush failed, rows not requeued"),
            }
        });
    }
}
