//! Error types for candidate domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain candidate values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CandidateDomainError {
    /// The client identifier is empty after trimming.
    #[error("client identifier must not be empty")]
    EmptyClientId,

    /// The score range has its bounds reversed.
    #[error("invalid score range: minimum {min} exceeds maximum {max}")]
    InvalidScoreRange {
        /// Requested lower bound.
        min: String,
        /// Requested upper bound.
        max: String,
    },

    /// The form kind token is not recognised.
    #[error("unknown form kind: {0}")]
    UnknownFormKind(String),

    /// The pipeline status token is not recognised.
    #[error(transparent)]
    PipelineStatus(#[from] ParsePipelineStatusError),
}

/// Error returned while parsing pipeline statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pipeline status: {0}")]
pub struct ParsePipelineStatusError(pub String);
