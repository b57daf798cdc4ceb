//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Success response for `/track`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TrackResponse {
    /// Batch relayed to the sink.
    pub fn accepted(rows: usize) -> Self {
        Self {
            ok: true,
            rows: Some(rows),
            note: None,
        }
    }

    /// Batch accepted but intentionally not relayed.
    pub fn dropped(note: impl Into<String>) -> Self {
        Self {
            ok: true,
            rows: None,
            note: Some(note.into()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sink_configured: bool,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
            detail: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// API error type carrying the HTTP status.
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            response: ErrorResponse::new(msg),
        }
    }

    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            response: ErrorResponse::new(msg),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            response: ErrorResponse::new(msg),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            response: ErrorResponse::new(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<footfall_core::Error> for ApiError {
    fn from(err: footfall_core::Error) -> Self {
        match &err {
            footfall_core::Error::Validation(msg) => ApiError::bad_request(msg.clone()),
            footfall_core::Error::Serialization(e) => ApiError::bad_request(e.to_string()),
            footfall_core::Error::Transport(msg) => ApiError {
                status: StatusCode::BAD_GATEWAY,
                response: ErrorResponse::new("failed to reach sink").with_detail(msg.clone()),
            },
            footfall_core::Error::SinkRejected { status, detail } => ApiError {
                status: StatusCode::BAD_GATEWAY,
                response: ErrorResponse::new("sink returned an error")
                    .with_status(*status)
                    .with_detail(detail.clone()),
            },
            _ => ApiError::internal(err.to_string()),
        }
    }
}
