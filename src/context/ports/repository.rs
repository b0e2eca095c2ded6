//! Repository port for context entry persistence.

use crate::context::domain::{ContextEntry, NewContextEntry};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for context repository operations.
pub type ContextRepositoryResult<T> = Result<T, ContextRepositoryError>;

/// Context entry persistence contract.
#[async_trait]
pub trait ContextRepository: Send + Sync {
    /// Stores a new entry and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContextRepositoryError::UnknownUser`] when the owner does
    /// not exist in a store that enforces the relationship.
    async fn create(&self, entry: NewContextEntry) -> ContextRepositoryResult<ContextEntry>;

    /// Returns the user's entries dated on or after `since`, newest first.
    async fn list_since(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> ContextRepositoryResult<Vec<ContextEntry>>;
}

/// Errors returned by context repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ContextRepositoryError {
    /// The owning user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContextRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
