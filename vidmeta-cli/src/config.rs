//! Configuration module
//!
//! Handles CLI configuration: backend URL, identity token source,
//! local preferences location and poller tuning.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use vidmeta_client::{ApiClient, EnvToken, StaticToken, TokenProvider};
use vidmeta_poller::PollConfig;

use crate::store::PreferencesStore;

/// Environment variable consulted for the bearer token when `--token` is absent
pub const TOKEN_ENV: &str = "VIDMETA_TOKEN";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the metadata backend
    pub api_url: String,

    /// Token passed explicitly on the command line
    pub token: Option<String>,

    /// Directory holding local preference files
    pub config_dir: PathBuf,

    /// Backoff parameters used when watching jobs
    pub poll: PollConfig,
}

impl Config {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.api_url)
    }

    /// Token source for this invocation
    ///
    /// An explicit `--token` wins. Otherwise the environment is re-read on
    /// every request so a token refreshed during a long watch is picked up.
    pub fn token_provider(&self) -> Arc<dyn TokenProvider> {
        match &self.token {
            Some(token) => Arc::new(StaticToken::new(Some(token.clone()))),
            None => Arc::new(EnvToken::new(TOKEN_ENV)),
        }
    }

    pub fn preferences(&self) -> PreferencesStore {
        PreferencesStore::new(self.config_dir.join("preferences.json"))
    }
}

/// Default location for local configuration (`$HOME/.config/vidmeta`)
pub fn default_config_dir() -> Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set; pass --config-dir or set VIDMETA_CONFIG_DIR")?;
    Ok(home.join(".config").join("vidmeta"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>) -> Config {
        Config {
            api_url: "http://localhost:8000/".to_string(),
            token: token.map(str::to_string),
            config_dir: PathBuf::from("/tmp/vidmeta-test"),
            poll: PollConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_explicit_token_wins() {
        let provider = config(Some("abc")).token_provider();
        assert_eq!(provider.token().await.as_deref(), Some("abc"));
    }

    #[test]
    fn test_client_and_store_paths() {
        let config = config(None);
        assert_eq!(config.client().base_url(), "http://localhost:8000");
        assert_eq!(
            config.preferences().path(),
            PathBuf::from("/tmp/vidmeta-test/preferences.json").as_path()
        );
    }
}
