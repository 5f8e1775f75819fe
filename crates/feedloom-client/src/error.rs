//! Error types for the collaborator seam.

use thiserror::Error;

use feedloom_core::CoreError;

use crate::endpoint::Endpoint;

/// Errors that can occur while talking to the node.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not complete (connection refused, reset, DNS...).
    #[error("{endpoint}: network error: {message}")]
    Network { endpoint: Endpoint, message: String },

    /// The node answered with a non-2xx status.
    #[error("{endpoint}: unexpected status {status}")]
    Status { endpoint: Endpoint, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("{endpoint}: timed out")]
    Timeout { endpoint: Endpoint },

    /// The body could not be decoded into the expected shape.
    #[error("{endpoint}: {source}")]
    Malformed {
        endpoint: Endpoint,
        #[source]
        source: CoreError,
    },

    /// The HTTP client could not be constructed.
    #[error("client configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The endpoint involved, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ClientError::Network { endpoint, .. }
            | ClientError::Status { endpoint, .. }
            | ClientError::Timeout { endpoint }
            | ClientError::Malformed { endpoint, .. } => Some(*endpoint),
            ClientError::Config(_) => None,
        }
    }

    /// Whether the request failed before any usable answer arrived.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClientError::Network { .. } | ClientError::Status { .. } | ClientError::Timeout { .. }
        )
    }
}

/// Result type for collaborator calls.
pub type Result<T> = std::result::Result<T, ClientError>;
