//! Port contracts for the completion service.

pub mod completion;

pub use completion::{
    CompletionClient, CompletionError, CompletionErrorKind, CompletionRequest, CompletionResult,
};
