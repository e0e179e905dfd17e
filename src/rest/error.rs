//! Errors returned by the request pipeline

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::route::RouteError;

/// Structured error body returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiError {
    /// Discord JSON error code (0 when the body was not a Discord error)
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    /// Per-field validation errors, kept as returned
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
    /// Seconds to wait, present on 429 responses
    #[serde(default)]
    pub retry_after: Option<f64>,
}

impl ApiError {
    /// Build from a raw response body, keeping non-JSON bodies as the message
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|_| ApiError {
            code: 0,
            message: String::from_utf8_lossy(body).into_owned(),
            errors: None,
            retry_after: None,
        })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Failure of a REST operation, one variant per stage
#[derive(Debug, Error)]
pub enum RestError {
    /// Route could not be compiled; nothing was sent
    #[error("route compilation failed: {0}")]
    Route(#[from] RouteError),

    /// Request body could not be serialized; nothing was sent
    #[error("request body encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Connection, TLS, or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote rejected the request
    #[error("API error {status}: {error}")]
    Api { status: StatusCode, error: ApiError },

    /// Success status but the body did not match the expected shape
    #[error("response decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// Entity outlived the client context it was built from; nothing was sent
    #[error("client context was dropped")]
    ContextDropped,
}

impl RestError {
    /// HTTP status for API errors
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RestError::Api { status, .. } => Some(*status),
            RestError::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Remote error payload for API errors
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            RestError::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            RestError::Transport(err) => err.is_timeout() || err.is_connect(),
            RestError::Api { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            RestError::Route(_)
            | RestError::Encode(_)
            | RestError::Decode(_)
            | RestError::ContextDropped => false,
        }
    }

    /// Server-suggested wait before retrying
    pub fn retry_after(&self) -> Option<Duration> {
        self.api_error()
            .and_then(|e| e.retry_after)
            .map(|secs| Duration::from_secs_f64(secs.clamp(0.0, 3600.0)))
    }
}

pub type RestResult<T> = Result<T, RestError>;
