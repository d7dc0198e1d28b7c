//! UnbelievaBoat REST API client implementation.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::ClientBuilder;
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;

use crate::auth::Token;
use crate::error::UnbError;
use crate::rest::classify::ApiOutcome;
use crate::rest::endpoints::{self, UNB_BASE_URL};
use crate::rest::traits::EconomyApi;
use crate::rest::transport::{HttpTransport, Method, Transport};
use crate::rest::types::{HealthCheck, HealthVerdict, IncrementBalanceRequest, SetBalanceRequest};
use crate::types::{BalanceRecord, normalize_balance, normalize_leaderboard};

/// The token and transport a client issues its requests with.
///
/// A session is fixed at construction; every request of the owning client
/// uses the same token and transport.
#[derive(Clone, Debug)]
pub struct Session<T> {
    token: Token,
    transport: T,
}

impl<T: Transport> Session<T> {
    /// Create a session from a token and transport.
    pub fn new(token: impl Into<Token>, transport: T) -> Self {
        Self {
            token: token.into(),
            transport,
        }
    }

    /// The API token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Perform one round trip and classify the response.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiOutcome, UnbError> {
        let result = self.transport.send(method, path, &self.token, body).await;
        ApiOutcome::from_transport(result)
    }
}

/// The UnbelievaBoat economy API client.
///
/// Each method performs exactly one HTTP round trip. There are no internal
/// retries: a rate-limited request fails with [`UnbError::RateLimited`] and
/// the caller decides when to try again.
///
/// # Example
///
/// ```rust,no_run
/// use unbelievaboat_api_client::rest::BalanceClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BalanceClient::new("your-api-token");
///
///     let balance = client.get_balance("guild_id", "user_id").await?;
///     println!("{} has {} cash", balance.user_id, balance.cash_amount());
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct BalanceClient<T = HttpTransport> {
    session: Session<T>,
}

impl BalanceClient<HttpTransport> {
    /// Create a new client with default settings.
    pub fn new(token: impl Into<Token>) -> Self {
        Self::builder(token).build()
    }

    /// Create a new client builder.
    pub fn builder(token: impl Into<Token>) -> BalanceClientBuilder {
        BalanceClientBuilder::new(token)
    }
}

impl<T: Transport> BalanceClient<T> {
    /// Create a client over a custom transport.
    pub fn with_transport(token: impl Into<Token>, transport: T) -> Self {
        Self {
            session: Session::new(token, transport),
        }
    }

    /// The session this client sends requests with.
    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, UnbError> {
        self.session.request(method, path, body).await?.into_body()
    }

    async fn call_json<P>(&self, method: Method, path: &str, payload: &P) -> Result<Vec<u8>, UnbError>
    where
        P: Serialize,
    {
        let body = serde_json::to_vec(payload)?;
        self.call(method, path, Some(body)).await
    }

    /// Check whether the API is reachable.
    ///
    /// The API root answers `404` when the service is alive, so a not-found
    /// response counts as healthy. This never fails; the verdict carries any
    /// error.
    pub async fn check_health(&self) -> HealthCheck {
        let start = Instant::now();
        let outcome = self.session.request(Method::GET, endpoints::ROOT, None).await;
        let elapsed = start.elapsed();

        let verdict = match outcome {
            Ok(ApiOutcome::Success(_)) | Ok(ApiOutcome::NotFound) => HealthVerdict::Healthy,
            Ok(ApiOutcome::Unauthorized) => HealthVerdict::CredentialsRejected,
            Ok(ApiOutcome::RateLimited {
                message,
                retry_after,
            }) => HealthVerdict::RateLimited {
                message,
                retry_after,
            },
            Ok(ApiOutcome::TransportFailure(e)) => HealthVerdict::Unreachable(e),
            Ok(ApiOutcome::ApiError(e)) => HealthVerdict::Unhealthy(UnbError::Api(e)),
            Err(e) => HealthVerdict::Unhealthy(e),
        };
        tracing::debug!(?elapsed, ?verdict, "health check finished");

        HealthCheck { elapsed, verdict }
    }

    /// Get a user's balance in a guild.
    pub async fn get_balance(&self, guild_id: &str, user_id: &str) -> Result<BalanceRecord, UnbError> {
        let path = endpoints::user_balance(guild_id, user_id)?;
        let body = self.call(Method::GET, &path, None).await?;
        normalize_balance(&body)
    }

    /// Set a user's balance to absolute values.
    ///
    /// Only the fields set on the request are changed.
    pub async fn set_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &SetBalanceRequest,
    ) -> Result<BalanceRecord, UnbError> {
        let path = endpoints::user_balance(guild_id, user_id)?;
        let body = self.call_json(Method::PUT, &path, request).await?;
        normalize_balance(&body)
    }

    /// Add to (or subtract from) a user's balance.
    pub async fn increment_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &IncrementBalanceRequest,
    ) -> Result<BalanceRecord, UnbError> {
        let path = endpoints::user_balance(guild_id, user_id)?;
        let body = self.call_json(Method::PATCH, &path, request).await?;
        normalize_balance(&body)
    }

    /// Get a guild's leaderboard, in the order the service ranks it.
    pub async fn get_leaderboard(&self, guild_id: &str) -> Result<Vec<BalanceRecord>, UnbError> {
        let path = endpoints::leaderboard(guild_id)?;
        let body = self.call(Method::GET, &path, None).await?;
        normalize_leaderboard(&body)
    }
}

impl<T: Transport> EconomyApi for BalanceClient<T> {
    async fn check_health(&self) -> HealthCheck {
        BalanceClient::check_health(self).await
    }

    async fn get_balance(&self, guild_id: &str, user_id: &str) -> Result<BalanceRecord, UnbError> {
        BalanceClient::get_balance(self, guild_id, user_id).await
    }

    async fn set_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &SetBalanceRequest,
    ) -> Result<BalanceRecord, UnbError> {
        BalanceClient::set_balance(self, guild_id, user_id, request).await
    }

    async fn increment_balance(
        &self,
        guild_id: &str,
        user_id: &str,
        request: &IncrementBalanceRequest,
    ) -> Result<BalanceRecord, UnbError> {
        BalanceClient::increment_balance(self, guild_id, user_id, request).await
    }

    async fn get_leaderboard(&self, guild_id: &str) -> Result<Vec<BalanceRecord>, UnbError> {
        BalanceClient::get_leaderboard(self, guild_id).await
    }
}

/// Builder for [`BalanceClient`] over the default HTTP transport.
pub struct BalanceClientBuilder {
    token: Token,
    base_url: String,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl BalanceClientBuilder {
    /// Create a new builder with default settings.
    pub fn new(token: impl Into<Token>) -> Self {
        Self {
            token: token.into(),
            base_url: UNB_BASE_URL.to_string(),
            user_agent: None,
            timeout: None,
            http_client: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom user agent.
    ///
    /// Ignored when a custom [`http_client`](Self::http_client) is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a per-request timeout.
    ///
    /// Ignored when a custom [`http_client`](Self::http_client) is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a pre-configured `reqwest` client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> BalanceClient {
        let reqwest_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut headers = HeaderMap::new();
                let user_agent = self.user_agent.unwrap_or_else(|| {
                    format!("unbelievaboat-api-client/{}", env!("CARGO_PKG_VERSION"))
                });
                let header_value = HeaderValue::from_str(&user_agent)
                    .unwrap_or_else(|_| HeaderValue::from_static("unbelievaboat-api-client"));
                headers.insert(USER_AGENT, header_value);

                let mut builder = reqwest::Client::builder().default_headers(headers);
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().unwrap_or_else(|_| reqwest::Client::new())
            }
        };

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        BalanceClient::with_transport(self.token, HttpTransport::new(client, self.base_url))
    }
}

impl std::fmt::Debug for BalanceClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("custom_http_client", &self.http_client.is_some())
            .finish()
    }
}
