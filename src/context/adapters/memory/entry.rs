//! In-memory repository for context entries.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, RwLock};

use crate::context::{
    domain::{ContextEntry, ContextEntryId, NewContextEntry},
    ports::{ContextRepository, ContextRepositoryError, ContextRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory context repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContextRepository {
    state: Arc<RwLock<InMemoryContextState>>,
}

#[derive(Debug, Default)]
struct InMemoryContextState {
    last_id: i64,
    entries: Vec<ContextEntry>,
}

impl InMemoryContextRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ContextRepositoryError {
    ContextRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ContextRepository for InMemoryContextRepository {
    async fn create(&self, entry: NewContextEntry) -> ContextRepositoryResult<ContextEntry> {
        let mut state = self.state.write().map_err(lock_error)?;
        let next_id = state.last_id + 1;
        let id = ContextEntryId::new(next_id).map_err(ContextRepositoryError::persistence)?;
        state.last_id = next_id;

        let stored = entry.into_entry(id);
        state.entries.push(stored.clone());
        Ok(stored)
    }

    async fn list_since(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> ContextRepositoryResult<Vec<ContextEntry>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut entries: Vec<ContextEntry> = state
            .entries
            .iter()
            .filter(|entry| entry.user_id() == user_id && entry.entry_date() >= since)
            .cloned()
            .collect();
        entries.sort_by(ContextEntry::cmp_recency);
        Ok(entries)
    }
}
