//! HTTP transport seam.
//!
//! The client never talks to the network directly; it hands a method, path,
//! token and optional JSON body to a [`Transport`] and gets back the raw status
//! and body. [`HttpTransport`] is the default `reqwest` implementation.

use std::borrow::Cow;
use std::future::Future;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest_middleware::ClientWithMiddleware;
use url::Url;

pub use reqwest::Method;

use crate::auth::Token;
use crate::error::UnbError;

/// Raw status and body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The body as text, replacing invalid UTF-8.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs one HTTP round trip against the API.
///
/// Implementations must return `Err` only when no response was received
/// (connection failure, timeout); any HTTP status, including errors, is an
/// `Ok` [`RawResponse`].
pub trait Transport: Send + Sync {
    /// Send a request to `path` (relative to the API base URL).
    fn send(
        &self,
        method: Method,
        path: &str,
        token: &Token,
        body: Option<Vec<u8>>,
    ) -> impl Future<Output = Result<RawResponse, UnbError>> + Send;
}

/// The default transport, backed by `reqwest` with tracing middleware.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport from a configured middleware client and base URL.
    pub fn new(http_client: ClientWithMiddleware, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, UnbError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: &Token,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, UnbError> {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, token.expose_secret());
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(middleware_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(reqwest_error)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn reqwest_error(e: reqwest::Error) -> UnbError {
    if e.is_timeout() {
        UnbError::Timeout
    } else {
        UnbError::Http(e)
    }
}

fn middleware_error(e: reqwest_middleware::Error) -> UnbError {
    match e {
        reqwest_middleware::Error::Reqwest(e) => reqwest_error(e),
        other => UnbError::HttpMiddleware(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        let client = reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build();
        HttpTransport::new(client, base_url)
    }

    #[test]
    fn test_url_joins_path() {
        let transport = transport("https://unbelievable.pizza/api/v1/");
        assert_eq!(transport.base_url(), "https://unbelievable.pizza/api/v1");
        assert_eq!(
            transport.url("/guilds/1/users").unwrap().as_str(),
            "https://unbelievable.pizza/api/v1/guilds/1/users"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let transport = transport("not a url");
        assert!(matches!(transport.url("/x"), Err(UnbError::Url(_))));
    }

    #[test]
    fn test_raw_response_text() {
        let response = RawResponse::new(200, b"{\"ok\":true}".to_vec());
        assert_eq!(response.body_text(), "{\"ok\":true}");
    }
}
