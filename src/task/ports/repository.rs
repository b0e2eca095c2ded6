//! Repository port for task persistence and lookup.

use crate::task::domain::{NewTask, Task, TaskChange, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every method is one atomic step against the store.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns it with its generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::UnknownUser`] when the owner does not
    /// exist in a store that enforces the relationship.
    async fn create(&self, task: NewTask) -> TaskRepositoryResult<Task>;

    /// Applies `change` to the stored task as of `now` and returns the result.
    ///
    /// The read and the write are one atomic step: a concurrent change to the
    /// same task is applied either wholly before or wholly after this one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn modify(
        &self,
        id: TaskId,
        change: TaskChange,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task owned by the user, most urgent first.
    ///
    /// The order matches [`Task::cmp_urgency`]: open before completed, then
    /// priority, then deadline with undated tasks last, then newest first.
    async fn list_for_user(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes a task.
    ///
    /// Returns `false` when the task was already absent; this is not an error.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
