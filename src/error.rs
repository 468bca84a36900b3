//! Error types for the TheTVDB client
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Every failure surfaces synchronously to the immediate caller; nothing is
//! retried or swallowed inside the client.
//!
//! ## Error Categories
//!
//! - **Configuration**: malformed values supplied by the caller (`InvalidArgument`)
//! - **Authorization**: the service answered 401 (`Unauthorized`)
//! - **Lookup**: the service answered 404 (`ResourceNotFound`)
//! - **Decoding**: the body is not a JSON envelope (`Parse`)
//! - **Transport**: everything else, carrying the original cause (`Transport`)

use crate::transport::TransportError;
use thiserror::Error;

/// Result type alias using our TvdbError type
pub type Result<T> = std::result::Result<T, TvdbError>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum TvdbError {
    /// A configuration value supplied by the caller was rejected.
    /// Never produced by network activity.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The service responded with HTTP 401
    #[error("Unauthorized request to {path}")]
    Unauthorized {
        /// Request path that was rejected
        path: String,
    },

    /// The service responded with HTTP 404
    #[error("Resource not found: {path}")]
    ResourceNotFound {
        /// Request path that was not found
        path: String,
    },

    /// Response body could not be interpreted as a JSON envelope
    #[error("Failed to parse API response: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    /// Any other network or protocol failure, left unconverted
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for TvdbError {
    fn from(source: serde_json::Error) -> Self {
        TvdbError::Parse { source }
    }
}

// Helper methods for creating common errors
impl TvdbError {
    /// Create an InvalidArgument error with a message
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        TvdbError::InvalidArgument(message.into())
    }

    /// Create an Unauthorized error for the given path
    pub fn unauthorized<S: Into<String>>(path: S) -> Self {
        TvdbError::Unauthorized { path: path.into() }
    }

    /// Create a ResourceNotFound error for the given path
    pub fn not_found<S: Into<String>>(path: S) -> Self {
        TvdbError::ResourceNotFound { path: path.into() }
    }

    /// Check if the caller has to authenticate again before retrying
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TvdbError::Unauthorized { .. })
    }

    /// Check if the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TvdbError::ResourceNotFound { .. })
    }

    /// HTTP status code behind this error, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TvdbError::Unauthorized { .. } => Some(401),
            TvdbError::ResourceNotFound { .. } => Some(404),
            TvdbError::Transport(TransportError::Status { status, .. }) => Some(*status),
            TvdbError::Transport(TransportError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            TvdbError::Unauthorized { .. } => {
                "Your TheTVDB session is missing or has expired. Please log in again.".to_string()
            }
            TvdbError::ResourceNotFound { path } => {
                format!("TheTVDB has no record at '{}'.", path)
            }
            TvdbError::Parse { .. } => {
                "TheTVDB returned a response that could not be read.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
