//! Trait definition for the economy REST API.
//!
//! [`EconomyApi`] abstracts the balance operations so callers can swap in a
//! mock or wrap the client with their own decorators.
//!
//! # Example
//!
//! ```rust,ignore
//! use unbelievaboat_api_client::rest::{BalanceClient, EconomyApi};
//!
//! async fn richest<C: EconomyApi>(client: &C, guild: &str) -> Result<(), unbelievaboat_api_client::UnbError> {
//!     let leaderboard = client.get_leaderboard(guild).await?;
//!     if let Some(top) = leaderboard.first() {
//!         println!("{} leads with {}", top.user_id, top.total_amount());
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;

use crate::error::UnbError;
use crate::rest::types::{HealthCheck, IncrementBalanceRequest, SetBalanceRequest};
use crate::types::BalanceRecord;

/// Trait defining the UnbelievaBoat economy operations.
pub trait EconomyApi: Send + Sync {
    /// Check whether the API is reachable.
    fn check_health(&self) -> impl Future<Output = HealthCheck> + Send;

    /// Get a user's balance in a guild.
    fn get_balance(
        &self,
        guild_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<BalanceRecord, UnbError>> + Send;

    /// Set a user's balance to absolute values.
    fn set_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &SetBalanceRequest,
    ) -> impl Future<Output = Result<BalanceRecord, UnbError>> + Send;

    /// Add to (or subtract from) a user's balance.
    fn increment_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &IncrementBalanceRequest,
    ) -> impl Future<Output = Result<BalanceRecord, UnbError>> + Send;

    /// Get a guild's leaderboard.
    fn get_leaderboard(
        &self,
        guild_id: &str,
    ) -> impl Future<Output = Result<Vec<BalanceRecord>, UnbError>> + Send;
}
