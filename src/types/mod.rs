//! Types shared across the UnbelievaBoat client library.

pub mod balance;
pub mod normalize;
pub mod serde_helpers;

pub use balance::{Amount, BalanceRecord, INFINITY, NEG_INFINITY};
pub use normalize::{RawField, canonicalize, normalize_balance, normalize_leaderboard, normalize_value};
