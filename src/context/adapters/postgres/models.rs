//! Diesel row models for context persistence.

use super::schema::context_entries;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for context entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = context_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ContextEntryRow {
    /// Store-generated identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Entry text.
    pub content: String,
    /// Source kind.
    pub entry_type: String,
    /// Date the entry refers to.
    pub entry_date: NaiveDate,
    /// Capture timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for context entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = context_entries)]
pub struct NewContextEntryRow {
    /// Owning user.
    pub user_id: i64,
    /// Entry text.
    pub content: String,
    /// Source kind.
    pub entry_type: String,
    /// Date the entry refers to.
    pub entry_date: NaiveDate,
    /// Capture timestamp.
    pub created_at: DateTime<Utc>,
}
