//! Response classification.
//!
//! The service signals failures inconsistently: rate limits by status code,
//! everything else by an `{"error": ..., "message": ...}` body that may come
//! with any status. [`classify`] maps a raw response onto exactly one
//! [`ApiOutcome`].
//!
//! Order of checks:
//! 1. status 429 -> [`ApiOutcome::RateLimited`]
//! 2. 2xx without `error` in the body -> [`ApiOutcome::Success`]
//! 3. body containing `error` -> not found / unauthorized / generic API error
//! 4. any other status -> generic API error carrying the status

use std::time::Duration;

use crate::error::{ApiError, UnbError, error_bodies};
use crate::rest::transport::RawResponse;
use crate::rest::types::RateLimitBody;

/// HTTP status used by the service for rate limiting.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

const ERROR_MARKER: &[u8] = b"error";

/// The classified result of one request.
#[derive(Debug)]
pub enum ApiOutcome {
    /// The request succeeded; carries the raw body for normalization.
    Success(Vec<u8>),
    /// HTTP 429 with the advertised delay.
    RateLimited {
        /// Message sent by the service
        message: String,
        /// Advertised delay before the next request (sent in milliseconds)
        retry_after: Duration,
    },
    /// `{"error":"404: Not found"}`
    NotFound,
    /// `{"error":"401: Unauthorized"}`
    Unauthorized,
    /// Any other error reported by the service.
    ApiError(ApiError),
    /// No response was received.
    TransportFailure(UnbError),
}

impl ApiOutcome {
    /// Classify the result of a transport call.
    ///
    /// Transport errors become [`ApiOutcome::TransportFailure`] without
    /// looking at any body. Returns `Err` only when the body breaks the
    /// service contract.
    pub fn from_transport(result: Result<RawResponse, UnbError>) -> Result<Self, UnbError> {
        match result {
            Ok(response) => classify(response.status, response.body),
            Err(cause) => Ok(ApiOutcome::TransportFailure(cause)),
        }
    }

    /// Whether this is [`ApiOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// Take the success body, or turn the outcome into its error.
    pub fn into_body(self) -> Result<Vec<u8>, UnbError> {
        match self {
            ApiOutcome::Success(body) => Ok(body),
            ApiOutcome::RateLimited {
                message,
                retry_after,
            } => Err(UnbError::RateLimited {
                message,
                retry_after,
            }),
            ApiOutcome::NotFound => Err(UnbError::NotFound),
            ApiOutcome::Unauthorized => Err(UnbError::Unauthorized),
            ApiOutcome::ApiError(e) => Err(UnbError::Api(e)),
            ApiOutcome::TransportFailure(e) => Err(e),
        }
    }
}

/// Classify a response by status code and body.
pub fn classify(status: u16, body: Vec<u8>) -> Result<ApiOutcome, UnbError> {
    if status == STATUS_TOO_MANY_REQUESTS {
        let limit: RateLimitBody = serde_json::from_slice(&body).map_err(|e| {
            protocol_violation(format!(
                "undecodable rate limit body ({}): {}",
                e,
                String::from_utf8_lossy(&body)
            ))
        })?;
        tracing::warn!(retry_after = ?limit.retry_after, "rate limited: {}", limit.message);
        return Ok(ApiOutcome::RateLimited {
            message: limit.message,
            retry_after: limit.retry_after,
        });
    }

    let has_error = contains_error_marker(&body);

    if (200..300).contains(&status) && !has_error {
        return Ok(ApiOutcome::Success(body));
    }

    if has_error {
        if body == error_bodies::NOT_FOUND.as_bytes() {
            return Ok(ApiOutcome::NotFound);
        }
        if body == error_bodies::UNAUTHORIZED.as_bytes() {
            return Ok(ApiOutcome::Unauthorized);
        }
        let error: ApiError = serde_json::from_slice(&body).map_err(|e| {
            protocol_violation(format!(
                "undecodable error body ({}): {}",
                e,
                String::from_utf8_lossy(&body)
            ))
        })?;
        return Ok(ApiOutcome::ApiError(error));
    }

    Ok(ApiOutcome::ApiError(ApiError::new(
        format!("HTTP {}", status),
        String::from_utf8_lossy(&body),
    )))
}

fn contains_error_marker(body: &[u8]) -> bool {
    body.windows(ERROR_MARKER.len()).any(|w| w == ERROR_MARKER)
}

fn protocol_violation(detail: String) -> UnbError {
    tracing::warn!("{}", detail);
    UnbError::Protocol(detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_str(status: u16, body: &str) -> Result<ApiOutcome, UnbError> {
        classify(status, body.as_bytes().to_vec())
    }

    #[test]
    fn test_rate_limited() {
        let outcome =
            classify_str(429, r#"{"message":"rate limited","retry_after":30}"#).unwrap();
        match outcome {
            ApiOutcome::RateLimited {
                message,
                retry_after,
            } => {
                assert_eq!(message, "rate limited");
                assert_eq!(retry_after, Duration::from_millis(30));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_body_malformed_is_fatal() {
        let err = classify_str(429, "Too Many Requests").unwrap_err();
        assert!(matches!(err, UnbError::Protocol(_)));
    }

    #[test]
    fn test_success() {
        let outcome = classify_str(200, r#"{"user_id":"1","cash":5}"#).unwrap();
        assert!(outcome.is_success());
        assert_eq!(outcome.into_body().unwrap(), br#"{"user_id":"1","cash":5}"#.to_vec());
    }

    #[test]
    fn test_unauthorized_regardless_of_status() {
        for status in [200, 401, 403, 500] {
            let outcome = classify_str(status, r#"{"error":"401: Unauthorized"}"#).unwrap();
            assert!(matches!(outcome, ApiOutcome::Unauthorized), "status {status}");
        }
    }

    #[test]
    fn test_not_found() {
        let outcome = classify_str(404, r#"{"error":"404: Not found"}"#).unwrap();
        assert!(matches!(outcome, ApiOutcome::NotFound));
        assert!(matches!(outcome.into_body(), Err(UnbError::NotFound)));
    }

    #[test]
    fn test_literal_match_is_exact() {
        let outcome =
            classify_str(404, r#"{"error":"404: Not found","message":"no such user"}"#).unwrap();
        match outcome {
            ApiOutcome::ApiError(e) => {
                assert_eq!(e.error, "404: Not found");
                assert_eq!(e.message, "no such user");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_generic_api_error() {
        let outcome =
            classify_str(400, r#"{"error":"400: Bad request","message":"cash is invalid"}"#)
                .unwrap();
        let err = outcome.into_body().unwrap_err();
        match err {
            UnbError::Api(e) => assert_eq!(e.code(), Some(400)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_marker_on_success_status() {
        let outcome = classify_str(200, r#"{"error":"500: Internal Server Error"}"#).unwrap();
        assert!(matches!(outcome, ApiOutcome::ApiError(_)));
    }

    #[test]
    fn test_undecodable_error_body_is_fatal() {
        let err = classify_str(502, "<html>Bad gateway error</html>").unwrap_err();
        assert!(matches!(err, UnbError::Protocol(_)));
    }

    #[test]
    fn test_non_success_status_without_marker() {
        let outcome = classify_str(503, "Service Unavailable").unwrap();
        match outcome {
            ApiOutcome::ApiError(e) => {
                assert_eq!(e.error, "HTTP 503");
                assert_eq!(e.message, "Service Unavailable");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_skips_body() {
        let outcome = ApiOutcome::from_transport(Err(UnbError::Timeout)).unwrap();
        assert!(matches!(outcome, ApiOutcome::TransportFailure(UnbError::Timeout)));
    }
}
