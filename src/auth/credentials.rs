//! Bearer-token credentials for the Coins.ph API.

use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

/// Default environment variable holding the API token.
pub const TOKEN_ENV_VAR: &str = "COINSPH_API_TOKEN";

/// API credentials: an OAuth bearer token.
#[derive(Clone)]
pub struct Credentials {
    token: SecretString,
}

impl Credentials {
    /// Create new credentials from a bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }

    /// Get the raw token.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose_token())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how the token is retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds the token directly.
#[derive(Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(token),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl CredentialsProvider for Arc<StaticCredentials> {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads the token from the environment.
///
/// By default, reads from `COINSPH_API_TOKEN`.
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variable.
    ///
    /// # Panics
    ///
    /// Panics if `COINSPH_API_TOKEN` is not set.
    pub fn from_env() -> Self {
        Self::from_env_var(TOKEN_ENV_VAR)
    }

    /// Create credentials from a custom environment variable.
    ///
    /// # Panics
    ///
    /// Panics if the environment variable is not set.
    pub fn from_env_var(var: &str) -> Self {
        let token =
            std::env::var(var).unwrap_or_else(|_| panic!("Environment variable {var} not set"));
        Self {
            credentials: Credentials::new(token),
        }
    }

    /// Try to create credentials from the default environment variable.
    ///
    /// Returns `None` if the variable is not set or empty.
    pub fn try_from_env() -> Option<Self> {
        Self::try_from_env_var(TOKEN_ENV_VAR)
    }

    /// Try to create credentials from a custom environment variable.
    pub fn try_from_env_var(var: &str) -> Option<Self> {
        let token = std::env::var(var).ok().filter(|t| !t.is_empty())?;
        Some(Self {
            credentials: Credentials::new(token),
        })
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials::new("super_secret_token");
        let debug_str = format!("{:?}", creds);
        assert!(!debug_str.contains("super_secret_token"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_static_credentials_bearer() {
        let provider = StaticCredentials::new("abc123");
        let creds = provider.get_credentials();
        assert_eq!(creds.expose_token(), "abc123");
        assert_eq!(creds.bearer(), "Bearer abc123");
    }

    #[test]
    fn test_try_from_missing_env_var() {
        assert!(EnvCredentials::try_from_env_var("COINSPH_TEST_UNSET_TOKEN_VAR").is_none());
    }
}
