//! Error types for the directory client.

use thiserror::Error;

/// A failed request.
///
/// `status` echoes the upstream HTTP status, or is `0` when no response
/// reached the client at all (connection refused, DNS, timeout).
///
/// Cloneable so a single failure can be handed to every caller waiting on
/// the same request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub status: u16,
}

impl TransportError {
    /// Status used when no response was received
    pub const NO_RESPONSE: u16 = 0;

    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Failure before any response arrived
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(message, Self::NO_RESPONSE)
    }

    /// Whether the request never produced a response
    pub fn is_network(&self) -> bool {
        self.status == Self::NO_RESPONSE
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Errors raised while constructing a client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Result type for directory requests.
pub type Result<T> = std::result::Result<T, TransportError>;
