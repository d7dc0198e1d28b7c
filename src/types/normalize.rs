//! Normalization of the service's loosely typed balance objects.
//!
//! The balance endpoints encode `cash`, `bank`, `total` and `rank` either as
//! JSON numbers or as JSON strings, and unbounded balances as the strings
//! `"Infinity"` / `"-Infinity"`. There is no discriminator in the payload, so
//! each field is decoded as an untyped [`Value`] first and then coerced based
//! on its JSON kind.
//!
//! # Example
//!
//! ```rust
//! use unbelievaboat_api_client::types::{normalize_balance, Amount};
//!
//! let body = br#"{"rank":"3","user_id":"123","cash":"Infinity","bank":250,"total":"Infinity"}"#;
//! let record = normalize_balance(body).unwrap();
//!
//! assert_eq!(record.rank, 3);
//! assert_eq!(record.cash, 0);
//! assert!(record.cash_infinite);
//! assert_eq!(record.bank_amount(), Amount::Finite(250));
//! ```

use serde_json::{Map, Number, Value};

use crate::error::UnbError;
use crate::types::balance::{Amount, BalanceRecord, parse_integer};

/// Wire keys of a balance object.
pub mod keys {
    /// Leaderboard position
    pub const RANK: &str = "rank";
    /// Discord user ID
    pub const USER_ID: &str = "user_id";
    /// Cash balance
    pub const CASH: &str = "cash";
    /// Bank balance
    pub const BANK: &str = "bank";
    /// Total balance
    pub const TOTAL: &str = "total";

    pub(crate) const ALL: [&str; 5] = [RANK, USER_ID, CASH, BANK, TOTAL];
}

/// One field of a raw balance object, classified by JSON kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    /// Key missing or `null`
    Absent,
    /// A JSON number
    Number(&'a Number),
    /// A JSON string
    Text(&'a str),
    /// Any other JSON kind (bool, array, object)
    Other(&'a Value),
}

impl<'a> RawField<'a> {
    /// Classify an optional JSON value.
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawField::Absent,
            Some(Value::Number(n)) => RawField::Number(n),
            Some(Value::String(s)) => RawField::Text(s),
            Some(other) => RawField::Other(other),
        }
    }

    /// Coerce a balance field (cash, bank, total), honoring the infinity sentinels.
    pub fn to_amount(self, field: &'static str) -> Result<Amount, UnbError> {
        match self {
            RawField::Text(s) => Amount::from_wire_str(s).ok_or_else(|| decode_error(field, s)),
            other => other.to_integer(field).map(Amount::Finite),
        }
    }

    /// Coerce an integer field without infinity handling.
    pub fn to_integer(self, field: &'static str) -> Result<i64, UnbError> {
        match self {
            RawField::Absent => Ok(0),
            RawField::Number(n) => n.as_i64().ok_or_else(|| decode_error(field, n.to_string())),
            RawField::Text(s) => parse_integer(s).ok_or_else(|| decode_error(field, s)),
            RawField::Other(v) => Err(decode_error(field, v.to_string())),
        }
    }

    /// Coerce the `user_id` field; numeric IDs are rendered as decimal text.
    pub fn to_user_id(self, field: &'static str) -> Result<String, UnbError> {
        match self {
            RawField::Absent => Ok(String::new()),
            RawField::Number(n) => Ok(n.to_string()),
            RawField::Text(s) => Ok(s.to_string()),
            RawField::Other(v) => Err(decode_error(field, v.to_string())),
        }
    }
}

fn decode_error(field: &'static str, raw: impl Into<String>) -> UnbError {
    UnbError::Decode {
        field,
        raw: raw.into(),
    }
}

/// Decode a balance response body into a [`BalanceRecord`].
pub fn normalize_balance(body: &[u8]) -> Result<BalanceRecord, UnbError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UnbError::Protocol(format!("balance body is not valid JSON: {}", e)))?;
    normalize_value(&value)
}

/// Normalize an already-decoded balance object.
pub fn normalize_value(value: &Value) -> Result<BalanceRecord, UnbError> {
    let object = as_object(value)?;
    let field = |key: &str| RawField::of(object.get(key));

    Ok(BalanceRecord::new(
        field(keys::RANK).to_integer(keys::RANK)?,
        field(keys::USER_ID).to_user_id(keys::USER_ID)?,
        field(keys::CASH).to_amount(keys::CASH)?,
        field(keys::BANK).to_amount(keys::BANK)?,
        field(keys::TOTAL).to_amount(keys::TOTAL)?,
    ))
}

/// Decode a leaderboard body (a JSON array of balance objects).
///
/// Each entry is first rewritten into the canonical all-string shape and then
/// normalized like a single balance. Order is preserved.
pub fn normalize_leaderboard(body: &[u8]) -> Result<Vec<BalanceRecord>, UnbError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| UnbError::Protocol(format!("leaderboard body is not valid JSON: {}", e)))?;
    let Value::Array(entries) = value else {
        return Err(UnbError::Protocol(format!(
            "expected a leaderboard array, got {}",
            kind_name(&value)
        )));
    };

    entries
        .iter()
        .map(|entry| normalize_value(&canonicalize(entry)?))
        .collect()
}

/// Rewrite a raw balance object so every present field is a JSON string.
///
/// Numbers keep their exact textual form. `null` and missing fields are left
/// out. Any other kind fails with [`UnbError::Decode`] naming the field.
pub fn canonicalize(value: &Value) -> Result<Value, UnbError> {
    let object = as_object(value)?;
    let mut canonical = Map::new();
    for key in keys::ALL {
        let text = match RawField::of(object.get(key)) {
            RawField::Absent => continue,
            RawField::Number(n) => n.to_string(),
            RawField::Text(s) => s.to_string(),
            RawField::Other(v) => return Err(decode_error(key, v.to_string())),
        };
        canonical.insert(key.to_string(), Value::String(text));
    }
    Ok(Value::Object(canonical))
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, UnbError> {
    value.as_object().ok_or_else(|| {
        UnbError::Protocol(format!(
            "expected a balance object, got {}",
            kind_name(value)
        ))
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
