//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user identifier is not a positive integer.
    #[error("invalid user id {0}, expected a positive integer")]
    InvalidUserId(i64),

    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The email address exceeds the 255-character storage limit.
    #[error("email address exceeds 255 character limit")]
    EmailTooLong,

    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,

    /// The display name exceeds the 255-character storage limit.
    #[error("user name exceeds 255 character limit")]
    NameTooLong,
}
