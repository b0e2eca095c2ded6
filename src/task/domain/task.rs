//! Task entity, creation drafts, and partial updates.

use super::{ContextTags, Priority, TaskId, TaskStatus, TaskTitle};
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Assistant suggestion captured when a task is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    /// Suggested priority.
    pub priority: Priority,
    /// Suggested deadline, if the assistant proposed one.
    pub deadline: Option<DateTime<Utc>>,
    /// Short explanation shown next to the suggestion.
    pub reasoning: Option<String>,
}

/// A persisted unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: TaskTitle,
    description: Option<String>,
    priority: Priority,
    status: TaskStatus,
    deadline: Option<DateTime<Utc>>,
    ai_suggested_priority: Option<Priority>,
    ai_suggested_deadline: Option<DateTime<Utc>>,
    ai_reasoning: Option<String>,
    context_tags: ContextTags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-generated identifier.
    pub id: TaskId,
    /// Owning user.
    pub user_id: UserId,
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Authoritative priority.
    pub priority: Priority,
    /// Current status.
    pub status: TaskStatus,
    /// Authoritative deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Advisory priority suggested at creation.
    pub ai_suggested_priority: Option<Priority>,
    /// Advisory deadline suggested at creation.
    pub ai_suggested_deadline: Option<DateTime<Utc>>,
    /// Reasoning returned with the suggestion.
    pub ai_reasoning: Option<String>,
    /// Ordered context tags.
    pub context_tags: ContextTags,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp, set only while completed.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            deadline: data.deadline,
            ai_suggested_priority: data.ai_suggested_priority,
            ai_suggested_deadline: data.ai_suggested_deadline,
            ai_reasoning: data.ai_reasoning,
            context_tags: data.context_tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the authoritative priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the authoritative deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the advisory priority suggested at creation.
    #[must_use]
    pub const fn ai_suggested_priority(&self) -> Option<Priority> {
        self.ai_suggested_priority
    }

    /// Returns the advisory deadline suggested at creation.
    #[must_use]
    pub const fn ai_suggested_deadline(&self) -> Option<DateTime<Utc>> {
        self.ai_suggested_deadline
    }

    /// Returns the reasoning behind the advisory fields.
    #[must_use]
    pub fn ai_reasoning(&self) -> Option<&str> {
        self.ai_reasoning.as_deref()
    }

    /// Returns the context tags.
    #[must_use]
    pub const fn context_tags(&self) -> &ContextTags {
        &self.context_tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns true when the deadline has passed and the task is still open.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_completed() && self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Applies the fields present in `patch`, leaving all others untouched.
    ///
    /// Always refreshes `updated_at`. Advisory fields are never changed.
    pub fn apply_patch(&mut self, patch: TaskPatch, clock: &impl Clock) {
        self.patch_at(patch, clock.utc());
    }

    /// Flips completion the way a checkbox does: completed tasks reopen as
    /// pending, anything else becomes completed.
    pub fn toggle_completion(&mut self, clock: &impl Clock) {
        self.toggle_at(clock.utc());
    }

    /// Applies a stored-task mutation as of `now`.
    ///
    /// Repositories call this while holding the row.
    pub fn apply_change(&mut self, change: TaskChange, now: DateTime<Utc>) {
        match change {
            TaskChange::Patch(patch) => self.patch_at(patch, now),
            TaskChange::ToggleCompletion => self.toggle_at(now),
        }
    }

    fn patch_at(&mut self, patch: TaskPatch, now: DateTime<Utc>) {
        let TaskPatch {
            title,
            description,
            priority,
            status,
            deadline,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description.and_then(normalize_text);
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_deadline) = deadline {
            self.deadline = new_deadline;
        }
        if let Some(new_status) = status {
            self.set_status(new_status, now);
        }
        self.updated_at = now;
    }

    fn toggle_at(&mut self, now: DateTime<Utc>) {
        let next = if self.status.is_completed() {
            TaskStatus::Pending
        } else {
            TaskStatus::Completed
        };
        self.set_status(next, now);
        self.updated_at = now;
    }

    /// Orders tasks most-urgent first.
    ///
    /// Open tasks precede completed ones, then ascending priority, then
    /// ascending deadline with undated tasks last, then newest first.
    #[must_use]
    pub fn cmp_urgency(&self, other: &Self) -> Ordering {
        self.status
            .is_completed()
            .cmp(&other.status.is_completed())
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| match (self.deadline, other.deadline) {
                (Some(left), Some(right)) => left.cmp(&right),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| other.created_at.cmp(&self.created_at))
    }

    fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.completed_at = match (status, self.completed_at) {
            (TaskStatus::Completed, Some(already)) if self.status.is_completed() => Some(already),
            (TaskStatus::Completed, _) => Some(now),
            _ => None,
        };
        self.status = status;
    }
}

/// A task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    user_id: UserId,
    title: TaskTitle,
    description: Option<String>,
    priority: Priority,
    deadline: Option<DateTime<Utc>>,
    ai_suggestion: Option<AiSuggestion>,
    context_tags: ContextTags,
    created_at: DateTime<Utc>,
}

impl NewTask {
    /// Creates a pending, low-priority draft stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, title: TaskTitle, clock: &impl Clock) -> Self {
        Self {
            user_id,
            title,
            description: None,
            priority: Priority::default(),
            deadline: None,
            ai_suggestion: None,
            context_tags: ContextTags::new(),
            created_at: clock.utc(),
        }
    }

    /// Sets the description; blank text is stored as absent.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_text(description.into());
        self
    }

    /// Sets the authoritative priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the authoritative deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the context tags.
    #[must_use]
    pub fn with_context_tags(mut self, tags: ContextTags) -> Self {
        self.context_tags = tags;
        self
    }

    /// Records an assistant suggestion in the advisory fields and promotes
    /// it to the authoritative priority and deadline.
    #[must_use]
    pub fn with_promoted_suggestion(mut self, suggestion: AiSuggestion) -> Self {
        self.priority = suggestion.priority;
        self.deadline = suggestion.deadline;
        self.ai_suggestion = Some(suggestion);
        self
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the authoritative priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the authoritative deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the recorded assistant suggestion, if any.
    #[must_use]
    pub const fn ai_suggestion(&self) -> Option<&AiSuggestion> {
        self.ai_suggestion.as_ref()
    }

    /// Returns the context tags.
    #[must_use]
    pub const fn context_tags(&self) -> &ContextTags {
        &self.context_tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches a store-generated identifier, producing the persisted task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        let (ai_suggested_priority, ai_suggested_deadline, ai_reasoning) =
            self.ai_suggestion.map_or((None, None, None), |suggestion| {
                (
                    Some(suggestion.priority),
                    suggestion.deadline,
                    suggestion.reasoning,
                )
            });

        Task::from_persisted(PersistedTaskData {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: TaskStatus::Pending,
            deadline: self.deadline,
            ai_suggested_priority,
            ai_suggested_deadline,
            ai_reasoning,
            context_tags: self.context_tags,
            created_at: self.created_at,
            updated_at: self.created_at,
            completed_at: None,
        })
    }
}

/// Mutation of a stored task, applied by the repository in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    /// Overwrite the fields present in the patch.
    Patch(TaskPatch),
    /// Checkbox-style completion toggle.
    ToggleCompletion,
}

/// Partial update of a task's user-editable fields.
///
/// `None` leaves a field untouched. For the nullable fields, `Some(None)`
/// clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    priority: Option<Priority>,
    status: Option<TaskStatus>,
    deadline: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces or clears the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Returns true when the patch carries no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.deadline.is_none()
    }
}

fn normalize_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
