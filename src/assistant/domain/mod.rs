//! Typed results of assistant operations.

mod deadline;
mod error;
mod insight;

pub use deadline::parse_deadline;
pub use error::{AiServiceError, AiServiceResult};
pub use insight::{ParsedTask, PrioritySuggestion, TaskRecommendation, WorkloadAnalysis};
