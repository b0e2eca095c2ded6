//! Port contracts for context entries.

pub mod repository;

pub use repository::{ContextRepository, ContextRepositoryError, ContextRepositoryResult};
