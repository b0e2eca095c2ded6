//! Domain model for tasks.
//!
//! A task carries an authoritative priority and deadline, advisory copies of
//! whatever the assistant suggested at creation time, and an ordered set of
//! context tags. All infrastructure concerns stay outside this boundary.

mod error;
mod filter;
mod ids;
mod priority;
mod stats;
mod status;
mod tags;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::{TaskId, TaskTitle};
pub use priority::Priority;
pub use stats::TaskStats;
pub use status::TaskStatus;
pub use tags::ContextTags;
pub use task::{AiSuggestion, NewTask, PersistedTaskData, Task, TaskChange, TaskPatch};
