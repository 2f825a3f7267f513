//! Error type shared by the prefix model, parsers and hash functor.

use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, PrefixError>;

#[derive(ThisError, Debug)]
pub enum PrefixError {
    /// Malformed address or mask text, out of range prefix length, non-contiguous mask.
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    /// The value cannot move to the requested state (e.g. widening a prefix).
    #[error("Invalid State: {0}")]
    InvalidState(String),

    /// A cursor or stream read failed. The input was rewound to `offset`.
    #[error("Parse Failure at offset {offset}: {reason}")]
    ParseFailure { offset: u64, reason: String },

    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
}

impl PrefixError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        PrefixError::InvalidArgument(msg.into())
    }

    pub(crate) fn parse_failure(offset: u64, cause: &PrefixError) -> Self {
        let reason = match cause {
            PrefixError::InvalidArgument(msg) | PrefixError::InvalidState(msg) => msg.clone(),
            other => other.to_string(),
        };
        PrefixError::ParseFailure { offset, reason }
    }
}
