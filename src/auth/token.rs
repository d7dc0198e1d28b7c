//! API token handling.

use secrecy::{ExposeSecret, SecretString};

/// The API token issued by UnbelievaBoat for an application.
///
/// The token is sent verbatim in the `Authorization` header. It is kept in a
/// [`SecretString`] and never printed by `Debug`.
#[derive(Clone)]
pub struct Token(SecretString);

impl Token {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Get the raw token for the `Authorization` header.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for Token {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}
