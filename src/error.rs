//! Error types for the UnbelievaBoat client library.

use std::time::Duration;

use thiserror::Error;

/// The main error type for all UnbelievaBoat client operations.
#[derive(Error, Debug)]
pub enum UnbError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Request timed out before a response arrived
    #[error("Request timed out")]
    Timeout,

    /// The service returned an `{error, message}` body
    #[error("UnbelievaBoat API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded (HTTP 429)
    #[error("{message} Retry after: {retry_after:?}")]
    RateLimited {
        /// Message sent by the service
        message: String,
        /// Advertised delay before the next request (sent in milliseconds)
        retry_after: Duration,
    },

    /// The token was rejected
    #[error("401 Unauthorized (check your token)")]
    Unauthorized,

    /// The requested resource does not exist
    #[error("404 Not found")]
    NotFound,

    /// A balance field could not be coerced into an integer
    #[error("Failed to decode field `{field}` from {raw:?}")]
    Decode {
        /// Wire name of the offending field
        field: &'static str,
        /// The raw value as received
        raw: String,
    },

    /// The response body broke the service contract
    #[error("Protocol violation: {0}")]
    Protocol(String),
}

impl UnbError {
    /// Whether the caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        match self {
            UnbError::RateLimited { .. } | UnbError::Timeout => true,
            UnbError::Http(e) => e.is_connect() || e.is_timeout(),
            UnbError::HttpMiddleware(reqwest_middleware::Error::Reqwest(e)) => {
                e.is_connect() || e.is_timeout()
            }
            _ => false,
        }
    }

    /// The advertised retry delay, if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            UnbError::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    /// Whether this error came from the network layer rather than the service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            UnbError::Http(_) | UnbError::HttpMiddleware(_) | UnbError::Url(_) | UnbError::Timeout
        )
    }
}

/// An error reported by the service in its `{"error": ..., "message": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct ApiError {
    /// The error string (e.g., "400: Bad request")
    #[serde(default)]
    pub error: String,
    /// Human-readable detail, often empty
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.message)
    }
}

impl ApiError {
    /// Create a new API error from its error string and message.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// The leading HTTP-like code of the error string, if any (`"400: Bad request"` -> 400).
    pub fn code(&self) -> Option<u16> {
        let (code, _) = self.error.split_once(':')?;
        code.trim().parse().ok()
    }

    /// Check if this is a client-side (4xx) error.
    pub fn is_client_error(&self) -> bool {
        matches!(self.code(), Some(400..=499))
    }

    /// Check if this is a server-side (5xx) error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.code(), Some(500..=599))
    }
}

/// Exact response bodies the service uses for well-known failures.
///
/// These are matched byte-for-byte.
pub mod error_bodies {
    /// Body returned for unknown guilds, users and the API root.
    pub const NOT_FOUND: &str = r#"{"error":"404: Not found"}"#;
    /// Body returned when the token is missing or invalid.
    pub const UNAUTHORIZED: &str = r#"{"error":"401: Unauthorized"}"#;
}
