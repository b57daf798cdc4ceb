//! Unified error types for the footfall pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for tracker and relay.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// The downstream sink answered with a non-success status.
    #[error("sink returned {status}: {detail}")]
    SinkRejected { status: u16, detail: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a sink rejection with the diagnostic detail truncated to
    /// `max_detail` characters.
    pub fn sink_rejected(status: u16, detail: &str, max_detail: usize) -> Self {
        Self::SinkRejected {
            status,
            detail: detail.chars().take(max_detail).collect(),
        }
    }

    /// Get the HTTP status code for this error when surfaced by the relay.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Serialization(_) => 400,
            Self::Transport(_) => 502,
            Self::SinkRejected { .. } => 502,
            Self::Storage(_) => 500,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
        }
    }
}
