//! Unified SDK error types.

use thiserror::Error;

/// Application-level error code the backend pairs with HTTP 401 when the
/// session cookie is missing or no longer valid.
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidStatus(#[from] InvalidStatus),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// Whether this error is the backend signalling an expired session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, SdkError::Http(e) if e.is_session_expired())
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized ({}): {message}", .code.as_deref().unwrap_or("no code"))]
    Unauthorized {
        code: Option<String>,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request ({}): {message}", .code.as_deref().unwrap_or("no code"))]
    BadRequest {
        code: Option<String>,
        message: String,
    },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// 401 carrying the `UNAUTHORIZED` code. Other 401s are plain auth failures.
    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            HttpError::Unauthorized { code: Some(code), .. } if code == UNAUTHORIZED_CODE
        )
    }
}

/// An order status tag outside the closed set the dashboard understands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid order status: {0:?}")]
pub struct InvalidStatus(pub String);

/// Error payload returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "error")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Parse an error body, tolerating empty or non-JSON payloads.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            code: None,
            message: (!body.trim().is_empty()).then(|| body.to_string()),
        })
    }

    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}
