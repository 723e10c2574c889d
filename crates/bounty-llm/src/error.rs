//! Error types for application generation.

use thiserror::Error;

/// Errors that can occur while generating application text.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Prompt template cannot produce a listing-specific prompt
    #[error("invalid prompt template: {0}")]
    InvalidTemplate(String),

    /// No API key in the environment
    #[error("no API key configured for {provider}")]
    MissingApiKey {
        /// Provider name
        provider: String,
    },

    /// The provider refused the API key (401/403)
    #[error("{provider} rejected the API key")]
    Unauthorized {
        /// Provider name
        provider: String,
    },

    /// Any other non-success status
    #[error("{provider} answered with status {status}: {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body or error message
        message: String,
    },

    /// Response carried no choices
    #[error("{provider} returned no completion")]
    NoCompletion {
        /// Provider name
        provider: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success status but the body is not a completions object
    #[error("unreadable completion response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client could not be built
    #[error("http client setup failed: {0}")]
    HttpClient(String),
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, LlmError>;
