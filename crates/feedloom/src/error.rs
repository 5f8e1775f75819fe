//! Error types for the feed viewer.

use std::time::Duration;

use feedloom_client::ClientError;
use feedloom_core::CoreError;
use thiserror::Error;

/// Errors that can end a load or submission cycle.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A collaborator call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Core error (key format, response shape).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Identity and logs did not both arrive in time.
    #[error("load timed out after {0:?}")]
    Timeout(Duration),

    /// `create post` failed; the feed was not reloaded.
    #[error("submission failed: {0}")]
    SubmissionFailed(#[source] ClientError),

    /// The presentation surface could not be updated.
    #[error("surface error: {0}")]
    Surface(#[from] std::io::Error),

    /// Logging or CLI setup failed.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification, used to pick what to show the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    MalformedResponse,
    InvalidKeyFormat,
    Submission,
    Timeout,
    Local,
}

impl FailureKind {
    /// Short headline shown above the error details.
    pub fn headline(&self) -> &'static str {
        match self {
            FailureKind::Network => "Cannot reach the node",
            FailureKind::MalformedResponse => "The node sent an unreadable response",
            FailureKind::InvalidKeyFormat => "The node reported an invalid key",
            FailureKind::Submission => "Your post was not published",
            FailureKind::Timeout => "The node took too long to answer",
            FailureKind::Local => "Feedloom could not update its output",
        }
    }
}

impl FeedError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::Client(ClientError::Timeout { .. }) | FeedError::Timeout(_) => {
                FailureKind::Timeout
            }
            FeedError::Client(ClientError::Malformed { source, .. }) | FeedError::Core(source)
                if source.is_key_error() =>
            {
                FailureKind::InvalidKeyFormat
            }
            FeedError::Client(ClientError::Malformed { .. }) | FeedError::Core(_) => {
                FailureKind::MalformedResponse
            }
            FeedError::Client(ClientError::Network { .. } | ClientError::Status { .. }) => {
                FailureKind::Network
            }
            FeedError::SubmissionFailed(_) => FailureKind::Submission,
            FeedError::Client(ClientError::Config(_)) | FeedError::Surface(_) | FeedError::Config(_) => {
                FailureKind::Local
            }
        }
    }
}

/// Result type for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
