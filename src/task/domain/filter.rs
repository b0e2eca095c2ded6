//! Criteria for narrowing a task listing.

use super::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Narrows a listing to the tasks meeting every criterion present.
///
/// An empty filter keeps everything. Deadline bounds are inclusive and
/// exclude undated tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    deadline_from: Option<DateTime<Utc>>,
    deadline_to: Option<DateTime<Utc>>,
    overdue: Option<bool>,
    has_ai_suggestions: Option<bool>,
    search_terms: Vec<String>,
}

impl TaskFilter {
    /// Keeps tasks with this status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Keeps tasks at this priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Keeps tasks due at or after `from`.
    #[must_use]
    pub const fn with_deadline_from(mut self, from: DateTime<Utc>) -> Self {
        self.deadline_from = Some(from);
        self
    }

    /// Keeps tasks due at or before `to`.
    #[must_use]
    pub const fn with_deadline_to(mut self, to: DateTime<Utc>) -> Self {
        self.deadline_to = Some(to);
        self
    }

    /// Keeps overdue tasks, or only tasks that are not overdue.
    #[must_use]
    pub const fn with_overdue(mut self, overdue: bool) -> Self {
        self.overdue = Some(overdue);
        self
    }

    /// Keeps tasks carrying an advisory priority or deadline, or only tasks
    /// carrying neither.
    #[must_use]
    pub const fn with_ai_suggestions(mut self, present: bool) -> Self {
        self.has_ai_suggestions = Some(present);
        self
    }

    /// Keeps tasks where every whitespace-separated term occurs in the title,
    /// the description or a context tag, ignoring case.
    ///
    /// Blank text leaves the filter unchanged.
    #[must_use]
    pub fn with_search(mut self, text: &str) -> Self {
        self.search_terms = text.split_whitespace().map(str::to_lowercase).collect();
        self
    }

    /// Returns true when `task` meets every criterion as of `now`.
    #[must_use]
    pub fn matches(&self, task: &Task, now: DateTime<Utc>) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self.deadline_in_range(task.deadline())
            && self.overdue.is_none_or(|overdue| task.is_overdue(now) == overdue)
            && self
                .has_ai_suggestions
                .is_none_or(|present| has_advice(task) == present)
            && self.search_terms.iter().all(|term| mentions(task, term))
    }

    fn deadline_in_range(&self, deadline: Option<DateTime<Utc>>) -> bool {
        if self.deadline_from.is_none() && self.deadline_to.is_none() {
            return true;
        }
        deadline.is_some_and(|due| {
            self.deadline_from.is_none_or(|from| due >= from)
                && self.deadline_to.is_none_or(|to| due <= to)
        })
    }
}

const fn has_advice(task: &Task) -> bool {
    task.ai_suggested_priority().is_some() || task.ai_suggested_deadline().is_some()
}

fn mentions(task: &Task, term: &str) -> bool {
    let found = |text: &str| text.to_lowercase().contains(term);
    found(task.title().as_str())
        || task.description().is_some_and(found)
        || task
            .context_tags()
            .as_slice()
            .iter()
            .map(String::as_str)
            .any(found)
}
