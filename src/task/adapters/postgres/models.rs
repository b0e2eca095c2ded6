//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-generated identifier.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub id: i64,
    /// Owning user.
    #[diesel(sql_type = diesel::sql_types::Int8)]
    pub user_id: i64,
    /// Task title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Optional description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Authoritative priority.
    #[diesel(sql_type = diesel::sql_types::Int4)]
    pub priority: i32,
    /// Task status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Authoritative deadline.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub deadline: Option<DateTime<Utc>>,
    /// Advisory priority.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Int4>)]
    pub ai_suggested_priority: Option<i32>,
    /// Advisory deadline.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub ai_suggested_deadline: Option<DateTime<Utc>>,
    /// Suggestion reasoning.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub ai_reasoning: Option<String>,
    /// Context tags JSON array.
    #[diesel(sql_type = diesel::sql_types::Jsonb)]
    pub context_tags: Value,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning user.
    pub user_id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Authoritative priority.
    pub priority: i32,
    /// Task status.
    pub status: String,
    /// Authoritative deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Advisory priority.
    pub ai_suggested_priority: Option<i32>,
    /// Advisory deadline.
    pub ai_suggested_deadline: Option<DateTime<Utc>>,
    /// Suggestion reasoning.
    pub ai_reasoning: Option<String>,
    /// Context tags JSON array.
    pub context_tags: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset for the user-editable task columns.
///
/// `None` writes `NULL`, so a cleared description or deadline is persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesetRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Authoritative priority.
    pub priority: i32,
    /// Task status.
    pub status: String,
    /// Authoritative deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
}
