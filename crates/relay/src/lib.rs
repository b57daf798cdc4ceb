//! HTTP ingestion relay between the tracker and the analytics sink.

pub mod config;
pub mod extractors;
pub mod rate_limit;
pub mod response;
pub mod routes;
pub mod sanitize;
pub mod state;

pub use config::RelayConfig;
pub use routes::router;
pub use state::{AppState, HttpSink, Sink};
