//! Request payloads and response wrappers for the REST API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::UnbError;
use crate::types::Amount;
use crate::types::serde_helpers::{default_reason, millis_duration};

/// Absolute balance update sent with `PUT /guilds/{guild}/users/{user}`.
///
/// Cash and bank are each sent only when set, and each may be a finite value
/// or either infinity.
///
/// # Example
///
/// ```rust
/// use unbelievaboat_api_client::rest::SetBalanceRequest;
/// use unbelievaboat_api_client::types::Amount;
///
/// let request = SetBalanceRequest::new().bank(Amount::Infinity);
/// let json = serde_json::to_string(&request).unwrap();
/// assert_eq!(json, r#"{"bank":"Infinity","reason":"No reason provided."}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetBalanceRequest {
    /// New cash balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash: Option<Amount>,
    /// New bank balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Amount>,
    /// Audit log reason.
    #[serde(serialize_with = "default_reason::serialize")]
    pub reason: Option<String>,
}

impl SetBalanceRequest {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cash balance.
    pub fn cash(mut self, cash: impl Into<Amount>) -> Self {
        self.cash = Some(cash.into());
        self
    }

    /// Set the bank balance.
    pub fn bank(mut self, bank: impl Into<Amount>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    /// Set the audit log reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Relative balance update sent with `PATCH /guilds/{guild}/users/{user}`.
///
/// Both deltas are required and always finite; the service only accepts
/// infinity through [`SetBalanceRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncrementBalanceRequest {
    /// Amount added to cash (negative to remove).
    pub cash: i64,
    /// Amount added to bank (negative to remove).
    pub bank: i64,
    /// Audit log reason.
    #[serde(serialize_with = "default_reason::serialize")]
    pub reason: Option<String>,
}

impl IncrementBalanceRequest {
    /// Create a new increment.
    pub fn new(cash: i64, bank: i64) -> Self {
        Self {
            cash,
            bank,
            reason: None,
        }
    }

    /// Set the audit log reason.
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Body the service sends with HTTP 429.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RateLimitBody {
    /// Message, usually "You are being rate limited."
    #[serde(default)]
    pub message: String,
    /// Delay before the next request is accepted.
    ///
    /// The wire value is in milliseconds, so `"retry_after": 30` is 30 ms,
    /// not 30 seconds. Fractions round up to the next millisecond.
    #[serde(deserialize_with = "millis_duration::deserialize")]
    pub retry_after: Duration,
}

/// Result of [`check_health`](crate::rest::BalanceClient::check_health).
#[derive(Debug)]
pub struct HealthCheck {
    /// Wall-clock time of the attempt.
    pub elapsed: Duration,
    /// What the attempt says about the service.
    pub verdict: HealthVerdict,
}

/// The service's state as seen by a health check.
#[derive(Debug)]
pub enum HealthVerdict {
    /// The service answered normally.
    Healthy,
    /// The service is up but rejected the token.
    CredentialsRejected,
    /// Rate limited: the service is probably up, but this cannot be confirmed.
    RateLimited {
        /// Message sent by the service
        message: String,
        /// Advertised delay before the next request
        retry_after: Duration,
    },
    /// No response was received.
    Unreachable(UnbError),
    /// The service answered with an error or a malformed body.
    Unhealthy(UnbError),
}

impl HealthCheck {
    /// Whether the service is known to be up.
    pub fn is_up(&self) -> bool {
        matches!(
            self.verdict,
            HealthVerdict::Healthy | HealthVerdict::CredentialsRejected
        )
    }

    /// Whether the verdict is inconclusive because of rate limiting.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.verdict, HealthVerdict::RateLimited { .. })
    }

    /// Convert into the round-trip time, or the error that explains the verdict.
    pub fn into_result(self) -> Result<Duration, UnbError> {
        match self.verdict {
            HealthVerdict::Healthy => Ok(self.elapsed),
            HealthVerdict::CredentialsRejected => Err(UnbError::Unauthorized),
            HealthVerdict::RateLimited {
                message,
                retry_after,
            } => Err(UnbError::RateLimited {
                message,
                retry_after,
            }),
            HealthVerdict::Unreachable(e) | HealthVerdict::Unhealthy(e) => Err(e),
        }
    }
}
