//! Error type for assistant operations.

use crate::assistant::ports::CompletionError;
use thiserror::Error;

/// Result type for assistant operations.
pub type AiServiceResult<T> = Result<T, AiServiceError>;

/// Failure of an assistant operation.
///
/// Callers see one error type regardless of whether the transport failed or
/// the reply did not fit the expected shape.
#[derive(Debug, Clone, Error)]
pub enum AiServiceError {
    /// The completion service could not be reached or rejected the call.
    #[error("completion service failed during {operation}: {source}")]
    Completion {
        /// Assistant operation that issued the call.
        operation: &'static str,
        /// Underlying transport failure.
        source: CompletionError,
    },

    /// The reply did not match the requested schema or its value ranges.
    #[error("invalid {operation} reply: {reason}")]
    InvalidReply {
        /// Assistant operation that issued the call.
        operation: &'static str,
        /// Description of the mismatch.
        reason: String,
    },

    /// A prompt template could not be rendered.
    #[error("failed to render {operation} prompt: {reason}")]
    Prompt {
        /// Assistant operation being prepared.
        operation: &'static str,
        /// Renderer message.
        reason: String,
    },
}

impl AiServiceError {
    /// Builds an [`AiServiceError::InvalidReply`].
    #[must_use]
    pub fn invalid_reply(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidReply {
            operation,
            reason: reason.into(),
        }
    }
}
