//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use footfall_core::limits::MAX_SINK_DETAIL_LEN;
use footfall_core::{Error, Result, RowBatch};

use crate::config::RelayConfig;
use crate::rate_limit::{RateLimiter, SharedRateLimiter};

/// Downstream sink (HTTP push endpoint in production, mock in tests).
#[async_trait]
pub trait Sink: Send + Sync {
    /// Forward a sanitized batch to the sink.
    async fn push(&self, batch: &RowBatch) -> Result<()>;
}

/// Server-to-server HTTP sink client.
pub struct HttpSink {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn push(&self, batch: &RowBatch) -> Result<()> {
        debug!(endpoint = %self.endpoint, rows = batch.rows.len(), "forwarding batch to sink");

        let response = self
            .client
            .post(&self.endpoint)
            .json(batch)
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::sink_rejected(status, &body, MAX_SINK_DETAIL_LEN));
        }

        Ok(())
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Downstream sink; `None` means accept-and-drop.
    pub sink: Option<Arc<dyn Sink>>,
    pub config: RelayConfig,
    pub rate_limiter: SharedRateLimiter,
}

impl AppState {
    /// Build state from configuration, constructing the HTTP sink when a
    /// URL is configured.
    pub fn new(config: RelayConfig) -> Self {
        let sink: Option<Arc<dyn Sink>> = config.sink_url.as_ref().map(|url| {
            Arc::new(HttpSink::new(
                url.clone(),
                Duration::from_secs(config.sink_timeout_secs),
            )) as Arc<dyn Sink>
        });
        Self::with_sink(config, sink)
    }

    /// Build state with an injected sink implementation.
    pub fn with_sink(config: RelayConfig, sink: Option<Arc<dyn Sink>>) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        Self {
            sink,
            config,
            rate_limiter,
        }
    }

    /// Start the rate limiter cleanup background task.
    pub fn start_rate_limiter_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let rate_limiter = self.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(300));
            loop {
                interval.tick().await;
                rate_limiter.cleanup_stale(Duration::from_secs(600));
            }
        })
    }
}
