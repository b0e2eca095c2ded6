//! Error types for context domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing context domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextDomainError {
    /// The entry identifier is not a positive integer.
    #[error("invalid context entry id {0}, expected a positive integer")]
    InvalidEntryId(i64),

    /// The entry content is empty after trimming.
    #[error("context content must not be empty")]
    EmptyContent,

    /// The window length is negative.
    #[error("invalid context window of {0} days, expected zero or more")]
    InvalidWindow(i64),
}

/// Error returned while parsing entry types from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown context entry type: {0}")]
pub struct ParseEntryTypeError(pub String);
