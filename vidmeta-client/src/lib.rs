//! Vidmeta HTTP Client
//!
//! A small, type-safe HTTP client for the video metadata backend.
//!
//! The backend queues AI generation jobs for YouTube videos and exposes
//! their progress over a JSON API. This crate wraps those endpoints,
//! normalizes the backend's inconsistent job payloads into
//! [`vidmeta_core::domain::job::JobRecord`], and classifies failures into
//! [`ClientError`] variants that callers can act on.
//!
//! # Example
//!
//! ```no_run
//! use vidmeta_client::ApiClient;
//! use vidmeta_core::dto::job::GenerateRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:8000");
//!
//!     let queued = client.generate(&GenerateRequest {
//!         youtube_url: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
//!         ..Default::default()
//!     }, Some("token")).await?;
//!
//!     println!("Queued job: {}", queued.job_id);
//!     Ok(())
//! }
//! ```

mod account;
pub mod auth;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use auth::{EnvToken, StaticToken, TokenProvider};
pub use error::{ClientError, Result};
pub use jobs::JobFetcher;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the metadata backend API
///
/// Methods are grouped by concern:
/// - Jobs (generate, fetch, list recent)
/// - Account (usage, preferences, transcript upload)
///
/// Every method takes an optional bearer token. When it is `None` the
/// request is sent unauthenticated and the backend decides what to allow.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Example
    /// ```
    /// use vidmeta_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Attach the bearer token, if any
    fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses are turned into a classified [`ClientError`].
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;

        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no meaningful content
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        debug!("API returned {}: {}", status, message);

        Err(ClientError::from_status(status.as_u16(), message))
    }
}

/// Pick the most useful message out of an error body
///
/// The backend reports errors as `{"detail": ...}` or `{"message": ...}`;
/// anything else falls back to the raw body, then to `HTTP <status>`.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}
