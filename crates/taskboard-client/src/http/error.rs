/*
[INPUT]:  Error sources (HTTP transport, API responses, serialization, validation)
[OUTPUT]: Structured error types carrying the server-provided message
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Main error type for the task service client
#[derive(Error, Debug)]
pub enum TaskboardError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-2xx status
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected before it was sent
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl TaskboardError {
    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TaskboardError::Api {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    /// Build an API error from a raw non-2xx response body.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
        Self::api_error(status, message)
    }

    /// The message the service sent, verbatim, if this error came from it.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TaskboardError::Api { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TaskboardError::Api { code, .. } => Some(*code),
            TaskboardError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"detail": "..."}`, `{"detail": ["...", ...]}` and the
/// validation shape `{"detail": [{"msg": "..."}, ...]}`; anything else falls
/// back to the trimmed body text.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    match value.get("detail") {
        Some(Value::String(detail)) => Some(detail.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text.clone()),
                    Value::Object(map) => map
                        .get("msg")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                Some(trimmed.to_string())
            } else {
                Some(parts.join("; "))
            }
        }
        Some(other) => Some(other.to_string()),
        None => Some(trimmed.to_string()),
    }
}

/// Result type alias for task service operations
pub type Result<T> = std::result::Result<T, TaskboardError>;
