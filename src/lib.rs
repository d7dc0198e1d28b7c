//! # UnbelievaBoat Client
//!
//! An async Rust client library for the UnbelievaBoat economy REST API.
//!
//! ## Features
//!
//! - Get, set and increment user balances; fetch guild leaderboards
//! - Infinite balances (`"Infinity"` / `"-Infinity"` on the wire) made explicit
//! - Typed classification of rate limits, auth failures and API errors
//! - Pluggable transport for testing or custom HTTP stacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unbelievaboat_api_client::rest::{BalanceClient, IncrementBalanceRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BalanceClient::new("your-api-token");
//!
//!     let request = IncrementBalanceRequest::new(100, 0).reason("Daily bonus");
//!     let balance = client.increment_balance("guild_id", "user_id", &request).await?;
//!     println!("Cash is now {}", balance.cash_amount());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, UnbError};
pub use rest::BalanceClient;
pub use types::{Amount, BalanceRecord};

/// Result type alias using UnbError
pub type Result<T> = std::result::Result<T, UnbError>;
