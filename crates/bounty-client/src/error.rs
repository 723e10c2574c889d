//! Error types for marketplace operations.

use crate::operation::Operation;
use bounty_core::BountyError;
use thiserror::Error;

/// Errors that can occur while talking to the marketplace.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The transport answered with a non-success status
    #[error("{operation} request failed with status {status}")]
    RequestFailed {
        /// Operation that was sent
        operation: Operation,
        /// HTTP status code
        status: u16,
    },

    /// A search page came back empty; there are no more results
    #[error("search results exhausted")]
    ExhaustedResults,

    /// Contact method is not supported or has no configured value
    #[error("invalid contact method: {0}")]
    InvalidContactMethod(String),

    /// Detail lookup returned no listing
    #[error("listing {owner}/{slug} not found")]
    ListingNotFound {
        /// Listing slug
        slug: String,
        /// Owner handle
        owner: String,
    },

    /// The response body did not have the expected shape
    #[error("malformed {operation} response: {message}")]
    MalformedResponse {
        /// Operation that was sent
        operation: Operation,
        /// What was wrong
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Check if this is the end-of-results signal rather than a failure.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::ExhaustedResults)
    }
}

impl From<BountyError> for ClientError {
    fn from(err: BountyError) -> Self {
        match err {
            BountyError::InvalidContactMethod(method) => Self::InvalidContactMethod(method),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::RequestFailed {
            operation: Operation::SearchBounties,
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "BountiesPageSearch request failed with status 503"
        );

        let err = ClientError::ListingNotFound {
            slug: "landing-page".to_string(),
            owner: "alice".to_string(),
        };
        assert_eq!(err.to_string(), "listing alice/landing-page not found");
    }

    #[test]
    fn test_is_exhausted() {
        assert!(ClientError::ExhaustedResults.is_exhausted());
        assert!(!ClientError::RequestFailed {
            operation: Operation::SearchBounties,
            status: 500,
        }
        .is_exhausted());
    }

    #[test]
    fn test_from_core_contact_error() {
        let err: ClientError = BountyError::InvalidContactMethod("slack".to_string()).into();
        assert!(matches!(err, ClientError::InvalidContactMethod(ref m) if m == "slack"));
    }
}
