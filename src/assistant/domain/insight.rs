//! Validated assistant outputs.

use crate::task::domain::{AiSuggestion, ContextTags, Priority, TaskTitle};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Suggested priority and deadline for a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrioritySuggestion {
    /// Suggested priority.
    pub priority: Priority,
    /// Suggested deadline, if the model proposed one.
    pub deadline: Option<DateTime<Utc>>,
    /// Short justification.
    pub reasoning: String,
    /// Tags derived from the task and its context.
    pub context_tags: ContextTags,
}

impl PrioritySuggestion {
    /// Returns the advisory fields stored alongside the task.
    #[must_use]
    pub fn advisory(&self) -> AiSuggestion {
        AiSuggestion {
            priority: self.priority,
            deadline: self.deadline,
            reasoning: Some(self.reasoning.clone()).filter(|text| !text.trim().is_empty()),
        }
    }
}

/// Structured task extracted from free-form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    /// Extracted title.
    pub title: TaskTitle,
    /// Extracted description.
    pub description: Option<String>,
    /// Inferred priority.
    pub priority: Priority,
    /// Inferred deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Tags derived from the input and its context.
    pub context_tags: ContextTags,
}

/// A task the assistant proposes adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecommendation {
    /// Proposed title.
    pub title: String,
    /// Why the task is needed.
    pub description: String,
    /// Proposed priority.
    pub priority: Priority,
    /// Why the assistant proposes it.
    pub reasoning: String,
    /// Related tags.
    pub context_tags: ContextTags,
}

/// Narrative assessment of the open workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadAnalysis {
    /// Overall load assessment.
    pub workload_assessment: String,
    /// Commentary on how priorities are spread.
    pub priority_distribution: String,
    /// Scheduling observations.
    pub scheduling_insights: String,
    /// Two or three concrete suggestions.
    pub management_suggestions: Vec<String>,
}
