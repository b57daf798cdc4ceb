//! Common test setup functions.

use std::sync::Arc;

use axum::Router;

use relay::{router, AppState, RelayConfig, Sink};

use crate::mocks::MockSink;

/// Relay test context: the real router and middleware over a mock sink.
pub struct TestContext {
    pub router: Router,
    pub sink: Arc<MockSink>,
    pub config: RelayConfig,
}

impl TestContext {
    /// Context with a configured (mock) sink.
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Context with a custom relay configuration and a configured sink.
    pub fn with_config(config: RelayConfig) -> Self {
        let sink = Arc::new(MockSink::new());
        let state = AppState::with_sink(config.clone(), Some(sink.clone() as Arc<dyn Sink>));
        Self {
            router: router(state),
            sink,
            config,
        }
    }

    /// Context with no sink configured (accept-and-drop deployment).
    pub fn without_sink() -> Self {
        let config = test_config();
        let sink = Arc::new(MockSink::new());
        let state = AppState::with_sink(config.clone(), None);
        // The sink is kept so tests can assert nothing reached it.
        Self {
            router: router(state),
            sink,
            config,
        }
    }

    /// Set the mock sink to fail (for error testing).
    pub fn set_sink_failure(&self, should_fail: bool) {
        self.sink.set_should_fail(should_fail);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Relay config with a rate limit high enough to stay out of the way.
pub fn test_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.rate_limit.rate = 10_000;
    config.rate_limit.burst = 10_000;
    config
}
