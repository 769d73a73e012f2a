//! # Request Errors
//!
//! The single failure type returned by [`ApiClient::request`](super::client::ApiClient::request)
//! and every endpoint wrapper built on it.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one API request.
///
/// Callers usually only need [`RequestError::message`]. The variants separate
/// "the server answered with an error" from "the request never completed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    /// Non-2xx response. `message` comes from the JSON error body, or is
    /// synthesized as `HTTP <status>: <reason>` when the body has none.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response: connection refused, DNS failure, timeout, broken body stream.
    #[error("Network error: {0}")]
    Transport(String),

    /// 2xx response whose body does not match the expected schema.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request could not be built, e.g. a stored token that is not a valid header value.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// Build a server error from a status and the raw response body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<shared::ErrorResponse>(body)
            .ok()
            .and_then(shared::ErrorResponse::into_message)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                )
            });

        RequestError::Server {
            status: status.as_u16(),
            message,
        }
    }

    /// Human-readable message for display.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}
