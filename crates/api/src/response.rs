//! Response envelope shared by every endpoint.
//!
//! Handlers always answer HTTP 200; success or failure is carried in the
//! body as `{"status": "OK"}` or `{"status": "Error", "error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Outcome marker in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The request succeeded.
    #[serde(rename = "OK")]
    Ok,
    /// The request failed; see `error`.
    #[serde(rename = "Error")]
    Error,
}

/// Status and optional error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome marker.
    pub status: Status,
    /// Human-readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Success envelope.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            error: None,
        }
    }

    /// Failure envelope with `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        reply(self)
    }
}

/// Serializes `body` as JSON with HTTP 200.
pub fn reply<T: Serialize>(body: T) -> Response {
    (StatusCode::OK, Json(body)).into_response()
}
