//! Service layer for capturing context entries and reading trailing windows.

use crate::context::{
    domain::{
        ContextContent, ContextDomainError, ContextEntry, ContextWindow, EntryType,
        NewContextEntry,
    },
    ports::{ContextRepository, ContextRepositoryError},
};
use crate::user::domain::UserId;
use chrono::NaiveDate;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for capturing a context entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordContextRequest {
    user_id: UserId,
    content: String,
    entry_type: EntryType,
    entry_date: Option<NaiveDate>,
}

impl RecordContextRequest {
    /// Creates a request dated today.
    #[must_use]
    pub fn new(user_id: UserId, content: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            user_id,
            content: content.into(),
            entry_type,
            entry_date: None,
        }
    }

    /// Sets an explicit entry date.
    #[must_use]
    pub const fn with_entry_date(mut self, entry_date: NaiveDate) -> Self {
        self.entry_date = Some(entry_date);
        self
    }
}

/// Service-level errors for context operations.
#[derive(Debug, Error)]
pub enum ContextJournalError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ContextDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ContextRepositoryError),
}

/// Result type for context journal operations.
pub type ContextJournalResult<T> = Result<T, ContextJournalError>;

/// Context capture and retrieval service.
pub struct ContextJournalService<R, C>
where
    R: ContextRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ContextJournalService<R, C>
where
    R: ContextRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ContextJournalService<R, C>
where
    R: ContextRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new context journal service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Captures a context entry, dating it today unless the request says
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ContextJournalError::Domain`] for blank content and
    /// [`ContextJournalError::Repository`] when persistence fails.
    pub async fn record(
        &self,
        request: RecordContextRequest,
    ) -> ContextJournalResult<ContextEntry> {
        let RecordContextRequest {
            user_id,
            content,
            entry_type,
            entry_date,
        } = request;
        let content = ContextContent::new(content)?;
        let mut entry = NewContextEntry::new(user_id, content, entry_type, &*self.clock);
        if let Some(date) = entry_date {
            entry = entry.with_entry_date(date);
        }
        Ok(self.repository.create(entry).await?)
    }

    /// Returns the user's entries inside the trailing window, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ContextJournalError::Repository`] when the lookup fails.
    pub async fn list_recent(
        &self,
        user_id: UserId,
        window: ContextWindow,
    ) -> ContextJournalResult<Vec<ContextEntry>> {
        let since = window.since_today(&*self.clock);
        Ok(self.repository.list_since(user_id, since).await?)
    }
}
