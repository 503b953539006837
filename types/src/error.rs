//! Parse errors shared across crates.

use thiserror::Error;

/// Common error type for malformed domain values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GaussError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("poll type must not be empty")]
    EmptyPollType,

    #[error("match id must not be empty")]
    EmptyMatchId,
}
