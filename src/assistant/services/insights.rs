//! Recommendation and workload-analysis use cases.

use super::AiGateway;
use crate::assistant::{
    domain::{AiServiceError, TaskRecommendation, WorkloadAnalysis},
    ports::CompletionClient,
};
use crate::context::{
    domain::{ContextEntry, ContextWindow},
    ports::{ContextRepository, ContextRepositoryError},
};
use crate::task::{
    domain::Task,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::UserId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for insight operations.
#[derive(Debug, Error)]
pub enum InsightsError {
    /// Loading tasks failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
    /// Loading context failed.
    #[error(transparent)]
    Context(#[from] ContextRepositoryError),
    /// The assistant call failed.
    #[error(transparent)]
    Assistant(#[from] AiServiceError),
}

/// Result type for insight operations.
pub type InsightsResult<T> = Result<T, InsightsError>;

/// Produces recommendations and workload analyses for a user.
///
/// Both operations read the user's tasks and the default context window
/// concurrently, then make at most one assistant call.
pub struct InsightsService<T, X, G, C>
where
    T: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    context: Arc<X>,
    gateway: AiGateway<G, C>,
    clock: Arc<C>,
}

impl<T, X, G, C> Clone for InsightsService<T, X, G, C>
where
    T: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            context: Arc::clone(&self.context),
            gateway: self.gateway.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, X, G, C> InsightsService<T, X, G, C>
where
    T: TaskRepository + ?Sized,
    X: ContextRepository + ?Sized,
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new insights service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        context: Arc<X>,
        gateway: AiGateway<G, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            context,
            gateway,
            clock,
        }
    }

    /// Recommends new tasks from the last week of context.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`] when loading fails or the assistant call
    /// fails.
    pub async fn recommend(&self, user_id: UserId) -> InsightsResult<Vec<TaskRecommendation>> {
        let (tasks, context) = self.load(user_id).await?;
        Ok(self.gateway.recommend_tasks(&context, &tasks).await?)
    }

    /// Analyses the open workload against the last week of context.
    ///
    /// Returns `None` when the user has neither open tasks nor recent
    /// context.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError`] when loading fails or the assistant call
    /// fails.
    pub async fn analyze(&self, user_id: UserId) -> InsightsResult<Option<WorkloadAnalysis>> {
        let (tasks, context) = self.load(user_id).await?;
        Ok(self.gateway.analyze_tasks(&tasks, &context).await?)
    }

    async fn load(&self, user_id: UserId) -> InsightsResult<(Vec<Task>, Vec<ContextEntry>)> {
        let since = ContextWindow::default().since_today(&*self.clock);
        let tasks = async {
            self.tasks
                .list_for_user(user_id)
                .await
                .map_err(InsightsError::from)
        };
        let context = async {
            self.context
                .list_since(user_id, since)
                .await
                .map_err(InsightsError::from)
        };
        tokio::try_join!(tasks, context)
    }
}
