//! Error types for the vidmeta client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the metadata backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Resource not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Too many requests (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The account has used up its generation tokens
    #[error("Token limit exceeded: {0}")]
    TokenLimitExceeded(String),

    /// Response body could not be decoded or normalized
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request was rejected locally before being sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Classify a non-success response
    ///
    /// 404 and 429 get their own variants. A 400 whose message mentions the
    /// token limit is reported as [`ClientError::TokenLimitExceeded`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            400 if message.to_lowercase().contains("token limit") => {
                Self::TokenLimitExceeded(message)
            }
            _ => Self::ApiError { status, message },
        }
    }

    /// HTTP status associated with this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::RateLimited(_) => Some(429),
            Self::TokenLimitExceeded(_) => Some(400),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::ParseError(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error came from an undecodable response body
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }

    /// Check if repeating the same request could succeed
    ///
    /// Transport failures, server errors, rate limiting and garbled bodies
    /// are worth retrying. Missing jobs and rejected requests are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::RateLimited(_) | Self::ParseError(_) => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::NotFound(_) | Self::TokenLimitExceeded(_) | Self::InvalidRequest(_) => false,
        }
    }
}
