//! Request and response bodies exchanged over HTTP.
//!
//! Field names are camelCase on the wire. Request bodies keep every field
//! optional so a missing one is reported by name instead of as a generic
//! decoding failure.

use super::error::{ApiError, ApiResult};
use crate::assistant::domain::{TaskRecommendation, WorkloadAnalysis, parse_deadline};
use crate::context::{
    domain::{ContextEntry, ContextWindow, EntryType},
    services::RecordContextRequest,
};
use crate::task::{
    domain::{Priority, Task, TaskFilter, TaskPatch, TaskStats, TaskStatus, TaskTitle},
    services::{CreateTaskRequest, CreationMode},
};
use crate::user::{domain::User, domain::UserId, services::RegisterUserRequest};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an omitted field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require<T>(value: Option<T>, field: &'static str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::missing(field))
}

fn owner(raw: Option<i64>) -> ApiResult<UserId> {
    Ok(UserId::new(require(raw, "userId")?)?)
}

fn priority(raw: i64) -> ApiResult<Priority> {
    Ok(Priority::try_from(raw)?)
}

fn status(raw: &str) -> ApiResult<TaskStatus> {
    TaskStatus::try_from(raw).map_err(|err| ApiError::invalid("status", err.to_string()))
}

fn query_deadline(raw: Option<&str>, field: &'static str) -> ApiResult<Option<DateTime<Utc>>> {
    raw.map(|text| {
        parse_deadline(text)
            .ok_or_else(|| ApiError::invalid(field, format!("unrecognised date '{text}'")))
    })
    .transpose()
}

fn query_flag(raw: Option<&str>, field: &'static str) -> ApiResult<Option<bool>> {
    raw.map(|text| match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ApiError::invalid(
            field,
            format!("expected true or false, got '{text}'"),
        )),
    })
    .transpose()
}

/// Query string of `GET /tasks` and `GET /tasks/stats`.
///
/// Filter values arrive as text so a malformed one is reported by name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    /// Owner whose tasks are listed.
    pub user_id: Option<i64>,
    /// Optional status filter.
    pub status: Option<String>,
    /// Optional priority filter, 1 to 3.
    pub priority: Option<String>,
    /// Inclusive lower deadline bound.
    pub deadline_from: Option<String>,
    /// Inclusive upper deadline bound.
    pub deadline_to: Option<String>,
    /// Keep only overdue (`true`) or only not-overdue (`false`) tasks.
    pub is_overdue: Option<String>,
    /// Keep only tasks with (`true`) or without (`false`) advisory fields.
    #[serde(rename = "hasAISuggestions", alias = "hasAiSuggestions")]
    pub has_ai_suggestions: Option<String>,
    /// Terms matched against title, description and context tags.
    pub search: Option<String>,
}

impl TaskQuery {
    /// Validates the owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a missing or invalid `userId`.
    pub fn owner(&self) -> ApiResult<UserId> {
        owner(self.user_id)
    }

    /// Validates the optional status filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an unknown status.
    pub fn status_filter(&self) -> ApiResult<Option<TaskStatus>> {
        self.status.as_deref().map(status).transpose()
    }

    /// Validates every listing filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first malformed filter,
    /// or `deadlineFrom` when it falls after `deadlineTo`.
    pub fn filter(&self) -> ApiResult<TaskFilter> {
        let mut filter = TaskFilter::default();
        if let Some(wanted) = self.status_filter()? {
            filter = filter.with_status(wanted);
        }
        if let Some(text) = self.priority.as_deref() {
            let level = text.trim().parse::<i64>().map_err(|_| {
                ApiError::invalid("priority", format!("expected 1, 2 or 3, got '{text}'"))
            })?;
            filter = filter.with_priority(priority(level)?);
        }
        let from = query_deadline(self.deadline_from.as_deref(), "deadlineFrom")?;
        let to = query_deadline(self.deadline_to.as_deref(), "deadlineTo")?;
        if from.zip(to).is_some_and(|(lower, upper)| lower > upper) {
            return Err(ApiError::invalid(
                "deadlineFrom",
                "deadlineFrom must not be after deadlineTo",
            ));
        }
        if let Some(lower) = from {
            filter = filter.with_deadline_from(lower);
        }
        if let Some(upper) = to {
            filter = filter.with_deadline_to(upper);
        }
        if let Some(overdue) = query_flag(self.is_overdue.as_deref(), "isOverdue")? {
            filter = filter.with_overdue(overdue);
        }
        if let Some(present) =
            query_flag(self.has_ai_suggestions.as_deref(), "hasAISuggestions")?
        {
            filter = filter.with_ai_suggestions(present);
        }
        if let Some(text) = self.search.as_deref() {
            filter = filter.with_search(text);
        }
        Ok(filter)
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Owner of the new task.
    pub user_id: Option<i64>,
    /// Title, or the free-text input when `naturalLanguage` is set.
    pub title: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Priority for manual creation.
    pub priority: Option<i64>,
    /// Ask the assistant for priority, deadline and tags.
    #[serde(default, rename = "useAI")]
    pub use_ai: bool,
    /// Let the assistant parse every field from the title text.
    #[serde(default)]
    pub natural_language: bool,
}

impl CreateTaskBody {
    /// Converts the body into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for missing or malformed fields.
    pub fn into_request(self) -> ApiResult<CreateTaskRequest> {
        let Self {
            user_id,
            title,
            description,
            priority: raw_priority,
            use_ai,
            natural_language,
        } = self;

        let mut request = CreateTaskRequest::new(owner(user_id)?, require(title, "title")?)
            .with_mode(CreationMode::from_flags(use_ai, natural_language));
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(level) = raw_priority {
            request = request.with_priority(priority(level)?);
        }
        Ok(request)
    }
}

/// Body of `PUT /tasks/{id}`.
///
/// Omitted fields are left untouched; an explicit `null` clears
/// `description` or `deadline`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// New title.
    pub title: Option<String>,
    /// New description, or `null` to clear it.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// New priority.
    pub priority: Option<i64>,
    /// New status.
    pub status: Option<String>,
    /// New deadline, or `null` to clear it.
    #[serde(default, deserialize_with = "nullable")]
    pub deadline: Option<Option<String>>,
}

impl UpdateTaskBody {
    /// Converts the body into a domain patch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for malformed fields.
    pub fn into_patch(self) -> ApiResult<TaskPatch> {
        let mut patch = TaskPatch::new();
        if let Some(text) = self.title {
            patch = patch.with_title(TaskTitle::new(text)?);
        }
        if let Some(text) = self.description {
            patch = patch.with_description(text);
        }
        if let Some(level) = self.priority {
            patch = patch.with_priority(priority(level)?);
        }
        if let Some(raw) = self.status.as_deref() {
            patch = patch.with_status(status(raw)?);
        }
        if let Some(raw) = self.deadline {
            let deadline = raw
                .map(|text| {
                    parse_deadline(&text).ok_or_else(|| {
                        ApiError::invalid("deadline", format!("unrecognised deadline '{text}'"))
                    })
                })
                .transpose()?;
            patch = patch.with_deadline(deadline);
        }
        Ok(patch)
    }
}

/// Query string of `GET /context`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextQuery {
    /// Owner whose entries are listed.
    pub user_id: Option<i64>,
    /// Window length in days; seven when omitted.
    pub days: Option<i64>,
}

impl ContextQuery {
    /// Validates the owner and window.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a missing owner or a negative
    /// window.
    pub fn into_parts(self) -> ApiResult<(UserId, ContextWindow)> {
        let window = match self.days {
            Some(days) => ContextWindow::new(days)?,
            None => ContextWindow::default(),
        };
        Ok((owner(self.user_id)?, window))
    }
}

/// Body of `POST /context`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContextBody {
    /// Owner of the entry.
    pub user_id: Option<i64>,
    /// Entry text.
    pub content: Option<String>,
    /// One of `message`, `email`, `note`, `meeting`.
    pub entry_type: Option<String>,
    /// `YYYY-MM-DD`; today when omitted.
    pub entry_date: Option<String>,
}

impl CreateContextBody {
    /// Converts the body into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for missing or malformed fields.
    pub fn into_request(self) -> ApiResult<RecordContextRequest> {
        let user_id = owner(self.user_id)?;
        let content = require(self.content, "content")?;
        let raw_type = require(self.entry_type, "entryType")?;
        let entry_type = EntryType::try_from(raw_type.as_str())
            .map_err(|err| ApiError::invalid("entryType", err.to_string()))?;

        let request = RecordContextRequest::new(user_id, content, entry_type);
        match self.entry_date.as_deref().map(str::trim) {
            None | Some("") => Ok(request),
            Some(text) => {
                let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|err| {
                    ApiError::invalid("entryDate", format!("invalid date '{text}': {err}"))
                })?;
                Ok(request.with_entry_date(date))
            }
        }
    }
}

/// Body of `POST /ai/analyze` and `POST /ai/recommendations`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerBody {
    /// User the insight is computed for.
    pub user_id: Option<i64>,
}

impl OwnerBody {
    /// Validates the owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a missing or invalid `userId`.
    pub fn owner(&self) -> ApiResult<UserId> {
        owner(self.user_id)
    }
}

/// Body of `POST /users`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
    /// Email address, the user's natural key.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

impl CreateUserBody {
    /// Converts the body into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for missing fields.
    pub fn into_request(self) -> ApiResult<RegisterUserRequest> {
        Ok(RegisterUserRequest::new(
            require(self.email, "email")?,
            require(self.name, "name")?,
        ))
    }
}

/// Query string of `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    /// Exact email address to look up.
    pub email: Option<String>,
}

/// Task as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Identifier.
    pub id: i64,
    /// Owner.
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Authoritative priority.
    pub priority: Priority,
    /// Status.
    pub status: TaskStatus,
    /// Authoritative deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Advisory priority suggested at creation.
    pub ai_suggested_priority: Option<Priority>,
    /// Advisory deadline suggested at creation.
    pub ai_suggested_deadline: Option<DateTime<Utc>>,
    /// Reasoning behind the advisory fields.
    pub ai_reasoning: Option<String>,
    /// Context tags.
    pub context_tags: Vec<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Completion time.
    pub completed_at: Option<DateTime<Utc>>,
    /// Deadline passed while still open.
    pub is_overdue: bool,
}

impl TaskResponse {
    /// Renders a task as seen at `now`.
    #[must_use]
    pub fn from_task(task: &Task, now: DateTime<Utc>) -> Self {
        Self {
            id: task.id().value(),
            user_id: task.user_id().value(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            priority: task.priority(),
            status: task.status(),
            deadline: task.deadline(),
            ai_suggested_priority: task.ai_suggested_priority(),
            ai_suggested_deadline: task.ai_suggested_deadline(),
            ai_reasoning: task.ai_reasoning().map(str::to_owned),
            context_tags: task.context_tags().as_slice().to_vec(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            completed_at: task.completed_at(),
            is_overdue: task.is_overdue(now),
        }
    }
}

/// Context entry as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntryResponse {
    /// Identifier.
    pub id: i64,
    /// Owner.
    pub user_id: i64,
    /// Entry text.
    pub content: String,
    /// Source kind.
    pub entry_type: EntryType,
    /// Date the entry refers to.
    pub entry_date: NaiveDate,
    /// Capture time.
    pub created_at: DateTime<Utc>,
}

impl From<&ContextEntry> for ContextEntryResponse {
    fn from(entry: &ContextEntry) -> Self {
        Self {
            id: entry.id().value(),
            user_id: entry.user_id().value(),
            content: entry.content().as_str().to_owned(),
            entry_type: entry.entry_type(),
            entry_date: entry.entry_date(),
            created_at: entry.created_at(),
        }
    }
}

/// User as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Identifier.
    pub id: i64,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().as_str().to_owned(),
            name: user.name().as_str().to_owned(),
            created_at: user.created_at(),
        }
    }
}

/// `{ "task": ... }`
#[derive(Debug, Serialize)]
pub struct TaskEnvelope {
    /// The task.
    pub task: TaskResponse,
}

/// `{ "tasks": [...] }`
#[derive(Debug, Serialize)]
pub struct TaskListEnvelope {
    /// Tasks, most urgent first.
    pub tasks: Vec<TaskResponse>,
}

/// `{ "stats": ... }`
#[derive(Debug, Serialize)]
pub struct StatsEnvelope {
    /// Summary figures.
    pub stats: TaskStats,
}

/// `{ "contextEntry": ... }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntryEnvelope {
    /// The stored entry.
    pub context_entry: ContextEntryResponse,
}

/// `{ "contextEntries": [...] }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntriesEnvelope {
    /// Entries, newest first.
    pub context_entries: Vec<ContextEntryResponse>,
}

/// `{ "analysis": ... | null }`
#[derive(Debug, Serialize)]
pub struct AnalysisEnvelope {
    /// The analysis, or `null` when there was nothing to analyse.
    pub analysis: Option<WorkloadAnalysis>,
}

/// `{ "recommendations": [...] }`
#[derive(Debug, Serialize)]
pub struct RecommendationsEnvelope {
    /// Proposed new tasks.
    pub recommendations: Vec<TaskRecommendation>,
}

/// `{ "user": ... }`
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    /// The user.
    pub user: UserResponse,
}

/// `{ "success": true }`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Always true; deleting an absent task succeeds.
    pub success: bool,
}

/// `{ "status": "ok", "version": ... }`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Liveness marker.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}
