//! UnbelievaBoat economy REST API client.
//!
//! - [`BalanceClient`] issues the requests and returns normalized records.
//! - [`classify`] maps each raw response onto an [`ApiOutcome`].
//! - [`Transport`] is the seam to the network; [`HttpTransport`] is the
//!   default `reqwest` implementation.
//! - [`EconomyApi`] abstracts the operations for mocking.

mod classify;
mod client;
mod endpoints;
mod traits;
mod transport;
mod types;

pub use classify::{ApiOutcome, STATUS_TOO_MANY_REQUESTS, classify};
pub use client::{BalanceClient, BalanceClientBuilder, Session};
pub use endpoints::*;
pub use traits::EconomyApi;
pub use transport::{HttpTransport, Method, RawResponse, Transport};
pub use types::{
    HealthCheck, HealthVerdict, IncrementBalanceRequest, RateLimitBody, SetBalanceRequest,
};
