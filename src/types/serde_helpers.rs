//! Custom serde helpers for UnbelievaBoat's wire formats.

use std::time::Duration;

use serde::{Deserialize, Deserializer, de};

/// Deserialize a millisecond count (integer or fractional) into a [`Duration`].
///
/// Fractional values are rounded up to the next whole millisecond so a caller
/// waiting the returned delay never retries early.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use serde::Deserialize;
/// use unbelievaboat_api_client::types::serde_helpers::millis_duration;
///
/// #[derive(Deserialize, Debug)]
/// struct RateLimit {
///     #[serde(deserialize_with = "millis_duration::deserialize")]
///     retry_after: Duration,
/// }
///
/// let limit: RateLimit = serde_json::from_str(r#"{"retry_after":1500}"#).unwrap();
/// assert_eq!(limit.retry_after, Duration::from_millis(1500));
///
/// let limit: RateLimit = serde_json::from_str(r#"{"retry_after":12.2}"#).unwrap();
/// assert_eq!(limit.retry_after, Duration::from_millis(13));
/// ```
pub mod millis_duration {
    use super::*;

    /// Deserialize a non-negative number of milliseconds.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        if let Some(ms) = number.as_u64() {
            return Ok(Duration::from_millis(ms));
        }
        match number.as_f64() {
            Some(ms) if ms.is_finite() && ms >= 0.0 => Ok(Duration::from_millis(ms.ceil() as u64)),
            _ => Err(de::Error::custom(format!(
                "expected a non-negative millisecond count, got {}",
                number
            ))),
        }
    }
}

/// Serialize an optional reason, falling back to the service's default text.
///
/// The balance update endpoints record a reason in the guild's audit log;
/// when the caller provides none, `"No reason provided."` is sent.
pub mod default_reason {
    use serde::Serializer;

    /// Reason sent when the caller does not provide one.
    pub const DEFAULT_REASON: &str = "No reason provided.";

    /// Serialize `Some(reason)` as-is and `None` as [`DEFAULT_REASON`].
    pub fn serialize<S>(reason: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(reason.as_deref().unwrap_or(DEFAULT_REASON))
    }
}
