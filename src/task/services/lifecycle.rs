//! Service layer for task creation, mutation, and retrieval.

use crate::assistant::{
    domain::AiServiceError,
    ports::CompletionClient,
    services::AiGateway,
};
use crate::context::{
    domain::{ContextEntry, ContextWindow},
    ports::{ContextRepository, ContextRepositoryError},
};
use crate::task::{
    domain::{
        NewTask, Priority, Task, TaskChange, TaskDomainError, TaskFilter, TaskId, TaskPatch,
        TaskStats, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How a new task's fields are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreationMode {
    /// Caller-supplied fields only.
    #[default]
    Manual,
    /// Caller-supplied title and description; priority, deadline and tags
    /// come from an assistant suggestion.
    AiSuggested,
    /// The title is free text; every field comes from the assistant's parse.
    NaturalLanguage,
}

impl CreationMode {
    /// Resolves the request flags; natural-language parsing wins over a
    /// plain suggestion.
    #[must_use]
    pub const fn from_flags(use_ai: bool, natural_language: bool) -> Self {
        if natural_language {
            Self::NaturalLanguage
        } else if use_ai {
            Self::AiSuggested
        } else {
            Self::Manual
        }
    }
}

impl fmt::Display for CreationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::AiSuggested => "ai_suggested",
            Self::NaturalLanguage => "natural_language",
        })
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    user_id: UserId,
    title: String,
    description: Option<String>,
    priority: Option<Priority>,
    mode: CreationMode,
}

impl CreateTaskRequest {
    /// Creates a manual request with the required fields.
    #[must_use]
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            description: None,
            priority: None,
            mode: CreationMode::Manual,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority used by manual creation.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Selects how the task's fields are obtained.
    #[must_use]
    pub const fn with_mode(mut self, mode: CreationMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Loading grounding context failed.
    #[error(transparent)]
    Context(#[from] ContextRepositoryError),
    /// The assistant call behind an assisted creation failed.
    #[error("task creation failed: {0}")]
    TaskCreationFailed(#[source] AiServiceError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, X, G, C>
where
    R: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    context: Arc<X>,
    gateway: AiGateway<G, C>,
    clock: Arc<C>,
}

impl<R, X, G, C> Clone for TaskLifecycleService<R, X, G, C>
where
    R: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            context: Arc::clone(&self.context),
            gateway: self.gateway.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, X, G, C> TaskLifecycleService<R, X, G, C>
where
    R: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        context: Arc<X>,
        gateway: AiGateway<G, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            context,
            gateway,
            clock,
        }
    }

    /// Lists the user's tasks most urgent first, keeping those `filter`
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list(
        &self,
        user_id: UserId,
        filter: &TaskFilter,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks = self.repository.list_for_user(user_id).await?;
        let now = self.clock.utc();
        tasks.retain(|task| filter.matches(task, now));
        Ok(tasks)
    }

    /// Runs the create-task workflow.
    ///
    /// Assisted modes fetch the last week of context, make exactly one
    /// assistant call, and then store the task. There is no fallback to
    /// manual creation when the assistant fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for an invalid title,
    /// [`TaskLifecycleError::TaskCreationFailed`] when the assistant call
    /// fails, and [`TaskLifecycleError::Repository`] or
    /// [`TaskLifecycleError::Context`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let mode = request.mode;
        info!(user_id = %request.user_id, %mode, "creating task");
        let draft = match mode {
            CreationMode::Manual => self.manual_draft(request)?,
            CreationMode::AiSuggested => self.suggested_draft(request).await?,
            CreationMode::NaturalLanguage => self.parsed_draft(request).await?,
        };
        Ok(self.repository.create(draft).await?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn update(&self, task_id: TaskId, patch: TaskPatch) -> TaskLifecycleResult<Task> {
        self.modify(task_id, TaskChange::Patch(patch)).await
    }

    /// Flips completion: completed tasks reopen as pending, others complete.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task does
    /// not exist.
    pub async fn toggle(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.modify(task_id, TaskChange::ToggleCompletion).await
    }

    /// Deletes a task. Deleting an absent task succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the store fails.
    pub async fn delete(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        if !self.repository.delete(task_id).await? {
            debug!(task_id = %task_id, "task already absent");
        }
        Ok(())
    }

    /// Summarises the user's tasks as of now.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn stats(&self, user_id: UserId) -> TaskLifecycleResult<TaskStats> {
        let tasks = self.repository.list_for_user(user_id).await?;
        Ok(TaskStats::from_tasks(&tasks, self.clock.utc()))
    }

    async fn modify(&self, task_id: TaskId, change: TaskChange) -> TaskLifecycleResult<Task> {
        let task = self
            .repository
            .modify(task_id, change, self.clock.utc())
            .await?;
        debug!(task_id = %task_id, status = %task.status(), "task modified");
        Ok(task)
    }

    async fn recent_context(&self, user_id: UserId) -> TaskLifecycleResult<Vec<ContextEntry>> {
        let since = ContextWindow::default().since_today(&*self.clock);
        Ok(self.context.list_since(user_id, since).await?)
    }

    fn manual_draft(&self, request: CreateTaskRequest) -> TaskLifecycleResult<NewTask> {
        let CreateTaskRequest {
            user_id,
            title,
            description,
            priority,
            ..
        } = request;
        let mut draft = NewTask::new(user_id, TaskTitle::new(title)?, &*self.clock)
            .with_priority(priority.unwrap_or_default());
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        Ok(draft)
    }

    async fn suggested_draft(&self, request: CreateTaskRequest) -> TaskLifecycleResult<NewTask> {
        let CreateTaskRequest {
            user_id,
            title,
            description,
            ..
        } = request;
        let validated_title = TaskTitle::new(title)?;
        let context = self.recent_context(user_id).await?;
        let suggestion = self
            .gateway
            .suggest_task_priority(validated_title.as_str(), description.as_deref(), &context)
            .await
            .map_err(assistant_failure)?;

        let mut draft = NewTask::new(user_id, validated_title, &*self.clock)
            .with_context_tags(suggestion.context_tags.clone())
            .with_promoted_suggestion(suggestion.advisory());
        if let Some(text) = description {
            draft = draft.with_description(text);
        }
        Ok(draft)
    }

    async fn parsed_draft(&self, request: CreateTaskRequest) -> TaskLifecycleResult<NewTask> {
        let CreateTaskRequest { user_id, title, .. } = request;
        if title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle.into());
        }
        let context = self.recent_context(user_id).await?;
        let parsed = self
            .gateway
            .parse_natural_language_task(title.trim(), &context)
            .await
            .map_err(assistant_failure)?;

        let mut draft = NewTask::new(user_id, parsed.title, &*self.clock)
            .with_priority(parsed.priority)
            .with_context_tags(parsed.context_tags);
        if let Some(text) = parsed.description {
            draft = draft.with_description(text);
        }
        if let Some(deadline) = parsed.deadline {
            draft = draft.with_deadline(deadline);
        }
        Ok(draft)
    }
}

fn assistant_failure(err: AiServiceError) -> TaskLifecycleError {
    warn!(error = %err, "assisted task creation failed");
    TaskLifecycleError::TaskCreationFailed(err)
}
