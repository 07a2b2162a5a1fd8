//! Error types for the assistant domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for operations outside the resolution pipeline.
///
/// The pipeline itself never returns one of these to its caller; they show up
/// in configuration loading, provider construction and the CLI.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single call to a remote generative endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The endpoint answered with a non-success status.
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Connection refused, DNS failure, reset, or an unreadable body.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    /// A success status whose body lacks the candidate text.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether another attempt may succeed.
    ///
    /// Transport failures and non-success statuses are transient. A malformed
    /// success body is a content failure and is never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::Network(_) | Self::Timeout(_)
        )
    }
}
