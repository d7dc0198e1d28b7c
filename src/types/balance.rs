//! Balance types returned by the economy endpoints.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Wire sentinel for an unbounded positive balance.
pub const INFINITY: &str = "Infinity";

/// Wire sentinel for an unbounded negative balance.
pub const NEG_INFINITY: &str = "-Infinity";

/// A single balance value: a finite integer or one of the two infinities.
///
/// Serializes as a JSON number for finite values and as `"Infinity"` /
/// `"-Infinity"` otherwise, which is the shape the service accepts on `PUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amount {
    /// A finite balance
    Finite(i64),
    /// Unbounded positive balance
    Infinity,
    /// Unbounded negative balance
    NegInfinity,
}

impl Amount {
    /// Parse the string encoding used by the service.
    ///
    /// Accepts the two infinity sentinels and integers with an optional sign
    /// and optional `0x` prefix.
    pub fn from_wire_str(s: &str) -> Option<Self> {
        match s {
            INFINITY => Some(Amount::Infinity),
            NEG_INFINITY => Some(Amount::NegInfinity),
            other => parse_integer(other).map(Amount::Finite),
        }
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<i64> {
        match self {
            Amount::Finite(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is either infinity.
    pub fn is_infinite(&self) -> bool {
        !matches!(self, Amount::Finite(_))
    }

    /// Split into the `(value, infinite, neg_infinite)` triple stored in a [`BalanceRecord`].
    ///
    /// Infinite values carry a zero magnitude.
    pub fn into_parts(self) -> (i64, bool, bool) {
        match self {
            Amount::Finite(v) => (v, false, false),
            Amount::Infinity => (0, true, false),
            Amount::NegInfinity => (0, false, true),
        }
    }

    fn from_parts(value: i64, infinite: bool, neg_infinite: bool) -> Self {
        if infinite {
            Amount::Infinity
        } else if neg_infinite {
            Amount::NegInfinity
        } else {
            Amount::Finite(value)
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Finite(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Finite(v) => write!(f, "{}", v),
            Amount::Infinity => f.write_str(INFINITY),
            Amount::NegInfinity => f.write_str(NEG_INFINITY),
        }
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Amount::Finite(v) => serializer.serialize_i64(*v),
            Amount::Infinity => serializer.serialize_str(INFINITY),
            Amount::NegInfinity => serializer.serialize_str(NEG_INFINITY),
        }
    }
}

/// A user's balance in a guild, with infinities made explicit.
///
/// For each of cash, bank and total at most one of the two flags is set, and
/// when one is set the numeric field is zero. Use [`BalanceRecord::cash_amount`]
/// and friends to read a field as an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// Leaderboard position
    #[serde(default)]
    pub rank: i64,
    /// Discord user ID
    #[serde(default)]
    pub user_id: String,
    /// Cash balance
    #[serde(default)]
    pub cash: i64,
    /// Cash is `Infinity`
    #[serde(rename = "infinite_cash", default)]
    pub cash_infinite: bool,
    /// Cash is `-Infinity`
    #[serde(rename = "n-infinite_cash", default)]
    pub cash_neg_infinite: bool,
    /// Bank balance
    #[serde(default)]
    pub bank: i64,
    /// Bank is `Infinity`
    #[serde(rename = "infinite_bank", default)]
    pub bank_infinite: bool,
    /// Bank is `-Infinity`
    #[serde(rename = "n-infinite_bank", default)]
    pub bank_neg_infinite: bool,
    /// Total balance as reported by the service
    #[serde(default)]
    pub total: i64,
    /// Total is `Infinity`
    #[serde(rename = "infinite_total", default)]
    pub total_infinite: bool,
    /// Total is `-Infinity`
    #[serde(rename = "n-infinite_total", default)]
    pub total_neg_infinite: bool,
}

impl BalanceRecord {
    /// Build a record from typed amounts.
    pub fn new(
        rank: i64,
        user_id: impl Into<String>,
        cash: Amount,
        bank: Amount,
        total: Amount,
    ) -> Self {
        let (cash, cash_infinite, cash_neg_infinite) = cash.into_parts();
        let (bank, bank_infinite, bank_neg_infinite) = bank.into_parts();
        let (total, total_infinite, total_neg_infinite) = total.into_parts();
        Self {
            rank,
            user_id: user_id.into(),
            cash,
            cash_infinite,
            cash_neg_infinite,
            bank,
            bank_infinite,
            bank_neg_infinite,
            total,
            total_infinite,
            total_neg_infinite,
        }
    }

    /// Cash as an [`Amount`].
    pub fn cash_amount(&self) -> Amount {
        Amount::from_parts(self.cash, self.cash_infinite, self.cash_neg_infinite)
    }

    /// Bank as an [`Amount`].
    pub fn bank_amount(&self) -> Amount {
        Amount::from_parts(self.bank, self.bank_infinite, self.bank_neg_infinite)
    }

    /// Total as an [`Amount`].
    pub fn total_amount(&self) -> Amount {
        Amount::from_parts(self.total, self.total_infinite, self.total_neg_infinite)
    }
}

/// Parse an integer with optional sign and optional `0x`/`0X` hex prefix.
pub(crate) fn parse_integer(s: &str) -> Option<i64> {
    let (negative, unsigned) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u64::from_str_radix(hex, 16).ok()?
        }
        Some(_) => return None,
        None if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) => {
            unsigned.parse::<u64>().ok()?
        }
        None => return None,
    };

    let value = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_decimal_and_hex() {
        assert_eq!(parse_integer("0"), Some(0));
        assert_eq!(parse_integer("1500"), Some(1500));
        assert_eq!(parse_integer("-42"), Some(-42));
        assert_eq!(parse_integer("+7"), Some(7));
        assert_eq!(parse_integer("0x1F"), Some(31));
        assert_eq!(parse_integer("-0XfF"), Some(-255));
        assert_eq!(parse_integer("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_integer("-9223372036854775808"), Some(i64::MIN));
    }

    #[test]
    fn test_parse_integer_rejects_garbage() {
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("0x"), None);
        assert_eq!(parse_integer("0x+5"), None);
        assert_eq!(parse_integer("-+5"), None);
        assert_eq!(parse_integer("12.5"), None);
        assert_eq!(parse_integer(" 12"), None);
        assert_eq!(parse_integer("not-a-number"), None);
        assert_eq!(parse_integer("9223372036854775808"), None);
    }

    #[test]
    fn test_amount_from_wire_str() {
        assert_eq!(Amount::from_wire_str("Infinity"), Some(Amount::Infinity));
        assert_eq!(Amount::from_wire_str("-Infinity"), Some(Amount::NegInfinity));
        assert_eq!(Amount::from_wire_str("250"), Some(Amount::Finite(250)));
        assert_eq!(Amount::from_wire_str("infinity"), None);
    }

    #[test]
    fn test_amount_serialize() {
        assert_eq!(serde_json::to_string(&Amount::Finite(-3)).unwrap(), "-3");
        assert_eq!(serde_json::to_string(&Amount::Infinity).unwrap(), r#""Infinity""#);
        assert_eq!(
            serde_json::to_string(&Amount::NegInfinity).unwrap(),
            r#""-Infinity""#
        );
    }

    #[test]
    fn test_record_flags_and_accessors() {
        let record = BalanceRecord::new(
            1,
            "123",
            Amount::Infinity,
            Amount::NegInfinity,
            Amount::Finite(10),
        );
        assert_eq!(record.cash, 0);
        assert!(record.cash_infinite);
        assert!(!record.cash_neg_infinite);
        assert_eq!(record.bank, 0);
        assert!(record.bank_neg_infinite);
        assert_eq!(record.cash_amount(), Amount::Infinity);
        assert_eq!(record.bank_amount(), Amount::NegInfinity);
        assert_eq!(record.total_amount(), Amount::Finite(10));
    }

    #[test]
    fn test_record_serialized_keys() {
        let record = BalanceRecord::new(2, "42", Amount::Finite(5), Amount::Infinity, Amount::Infinity);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["infinite_bank"], true);
        assert_eq!(json["n-infinite_cash"], false);
        assert_eq!(json["infinite_total"], true);
        assert_eq!(json["user_id"], "42");

        let back: BalanceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
