//! Shared world state for task creation BDD scenarios.

use crate::test_helpers::TestApp;
use rstest::fixture;
use smart_todo::task::{domain::Task, services::TaskLifecycleError};
use smart_todo::user::domain::UserId;

/// Scenario world for task creation behaviour tests.
pub struct TaskCreationWorld {
    pub app: TestApp,
    pub owner: UserId,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskCreationWorld {
    /// Creates a world over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: TestApp::new(),
            owner: UserId::new(1).expect("valid user id"),
            last_result: None,
        }
    }

    /// Returns the task stored by the last creation.
    pub fn created_task(&self) -> Result<&Task, eyre::Report> {
        match self.last_result.as_ref() {
            Some(Ok(task)) => Ok(task),
            Some(Err(err)) => Err(eyre::eyre!("task creation failed: {err}")),
            None => Err(eyre::eyre!("no task was created in this scenario")),
        }
    }
}

impl Default for TaskCreationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskCreationWorld {
    TaskCreationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
