//! Diesel row models for user persistence.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for user records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Store-generated identifier.
    pub id: i64,
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Provisioning timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Unique email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Provisioning timestamp.
    pub created_at: DateTime<Utc>,
}
