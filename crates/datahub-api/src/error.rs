//! Error types for the datahub API client.

use std::fmt;

use thiserror::Error;

/// A specialized Result type for API client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the portal or hub APIs.
///
/// Remote failures carry the HTTP status, the request URL, and the server's
/// message so callers can report exactly which call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP-level error with status code.
    Http {
        status: u16,
        url: String,
        message: String,
    },
    /// Authentication failure (401/403).
    Auth { url: String, message: String },
    /// Rate limit exceeded (429).
    RateLimit { retry_after: Option<u64> },
    /// Resource not found (404).
    NotFound { url: String },
    /// Network/connection error.
    Network { message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http {
                status,
                url,
                message,
            } => write!(f, "HTTP error {} at {}: {}", status, url, message),
            ApiError::Auth { url, message } => write!(f, "Auth error at {}: {}", url, message),
            ApiError::RateLimit { retry_after } => match retry_after {
                Some(secs) => write!(f, "Rate limited, retry after {} seconds", secs),
                None => write!(f, "Rate limited"),
            },
            ApiError::NotFound { url } => write!(f, "Not found: {}", url),
            ApiError::Network { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns true if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::RateLimit { .. } | ApiError::Network { .. })
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Auth { .. } => Some(401),
            ApiError::RateLimit { .. } => Some(429),
            ApiError::NotFound { .. } => Some(404),
            ApiError::Network { .. } => None,
        }
    }
}

/// Top-level error for the client crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A typed remote error from the portal or hub API.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport-level failure from the HTTP client.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body that did not match the expected shape.
    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),
}
