//! Relay error taxonomy.

use thiserror::Error;

use crate::blockchain::BlockchainError;

/// Message returned instead of submission errors when redaction is on.
pub const REDACTED_SUBMISSION_MESSAGE: &str = "Transaction submission failed";

/// Everything a relay request can fail with. The display text is what the
/// client sees in `{"error": ...}`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Wrong HTTP verb for the endpoint.
    #[error("{0}")]
    MethodNotAllowed(&'static str),

    /// Missing or malformed request field. Nothing was submitted.
    #[error("{0}")]
    Validation(String),

    /// Unknown or unconfigured deployment.
    #[error("{0}")]
    NotFound(String),

    /// Signing, RPC or on-chain execution failure.
    #[error("{0}")]
    Submission(String),
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for failures caused by the caller.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, RelayError::Submission(_))
    }

    /// Replace internal detail with a generic message.
    pub fn redacted(self) -> Self {
        match self {
            RelayError::Submission(_) => {
                RelayError::Submission(REDACTED_SUBMISSION_MESSAGE.to_string())
            }
            other => other,
        }
    }
}

impl From<BlockchainError> for RelayError {
    fn from(err: BlockchainError) -> Self {
        RelayError::Submission(err.to_string())
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
