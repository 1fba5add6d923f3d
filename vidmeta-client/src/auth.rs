//! Bearer token providers
//!
//! Sign-in and token issuance happen at an external identity provider.
//! The client only asks for the current token right before each request.

use async_trait::async_trait;
use tracing::debug;

/// Source of bearer tokens
///
/// Implementations must not fail: a provider that cannot produce a token
/// returns `None` and the request goes out unauthenticated.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current bearer token, if one is available
    async fn token(&self) -> Option<String>;
}

/// Provider that always returns the same token
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token.filter(|t| !t.is_empty()))
    }

    /// Provider that never has a token
    pub fn anonymous() -> Self {
        Self(None)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Provider that reads an environment variable on every call
///
/// Picks up a token refreshed by an outside process without restarting.
#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvToken {
    async fn token(&self) -> Option<String> {
        match std::env::var(&self.var) {
            Ok(token) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                debug!("No token in {}: {}", self.var, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        assert_eq!(
            StaticToken::new(Some("abc".to_string())).token().await.as_deref(),
            Some("abc")
        );
        assert_eq!(StaticToken::new(Some(String::new())).token().await, None);
        assert_eq!(StaticToken::anonymous().token().await, None);
    }

    #[tokio::test]
    async fn test_env_token_missing_is_none() {
        let provider = EnvToken::new("VIDMETA_TEST_TOKEN_THAT_IS_NEVER_SET");
        assert_eq!(provider.token().await, None);
    }
}
