//! Context entry entity and its scalar types.

use super::{ContextDomainError, ParseEntryTypeError};
use crate::user::domain::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-generated identifier of a context entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextEntryId(i64);

impl ContextEntryId {
    /// Creates a validated entry identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ContextDomainError::InvalidEntryId`] when the value is not
    /// positive.
    pub const fn new(value: i64) -> Result<Self, ContextDomainError> {
        if value <= 0 {
            return Err(ContextDomainError::InvalidEntryId(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContextEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of source a context entry was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Chat or text message.
    Message,
    /// Email.
    Email,
    /// Free-form note.
    Note,
    /// Meeting notes.
    Meeting,
}

impl EntryType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Email => "email",
            Self::Note => "note",
            Self::Meeting => "meeting",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EntryType {
    type Error = ParseEntryTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "message" => Ok(Self::Message),
            "email" => Ok(Self::Email),
            "note" => Ok(Self::Note),
            "meeting" => Ok(Self::Meeting),
            _ => Err(ParseEntryTypeError(value.to_owned())),
        }
    }
}

/// Trimmed, non-empty entry text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextContent(String);

impl ContextContent {
    /// Creates validated entry content.
    ///
    /// # Errors
    ///
    /// Returns [`ContextDomainError::EmptyContent`] for blank text.
    pub fn new(value: impl Into<String>) -> Result<Self, ContextDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ContextDomainError::EmptyContent);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A persisted, immutable context note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    id: ContextEntryId,
    user_id: UserId,
    content: ContextContent,
    entry_type: EntryType,
    entry_date: NaiveDate,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted context entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedContextEntryData {
    /// Store-generated identifier.
    pub id: ContextEntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Entry text.
    pub content: ContextContent,
    /// Source kind.
    pub entry_type: EntryType,
    /// Date the entry refers to.
    pub entry_date: NaiveDate,
    /// Capture timestamp.
    pub created_at: DateTime<Utc>,
}

impl ContextEntry {
    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedContextEntryData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            content: data.content,
            entry_type: data.entry_type,
            entry_date: data.entry_date,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ContextEntryId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the entry text.
    #[must_use]
    pub const fn content(&self) -> &ContextContent {
        &self.content
    }

    /// Returns the source kind.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Returns the date the entry refers to.
    #[must_use]
    pub const fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Orders entries newest first: by entry date, then capture time.
    #[must_use]
    pub fn cmp_recency(&self, other: &Self) -> std::cmp::Ordering {
        other
            .entry_date
            .cmp(&self.entry_date)
            .then_with(|| other.created_at.cmp(&self.created_at))
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// A context entry that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContextEntry {
    user_id: UserId,
    content: ContextContent,
    entry_type: EntryType,
    entry_date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl NewContextEntry {
    /// Creates an entry dated today and stamped with the current time.
    #[must_use]
    pub fn new(
        user_id: UserId,
        content: ContextContent,
        entry_type: EntryType,
        clock: &impl Clock,
    ) -> Self {
        let created_at = clock.utc();
        Self {
            user_id,
            content,
            entry_type,
            entry_date: created_at.date_naive(),
            created_at,
        }
    }

    /// Overrides the entry date.
    #[must_use]
    pub const fn with_entry_date(mut self, entry_date: NaiveDate) -> Self {
        self.entry_date = entry_date;
        self
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the entry text.
    #[must_use]
    pub const fn content(&self) -> &ContextContent {
        &self.content
    }

    /// Returns the source kind.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Returns the date the entry refers to.
    #[must_use]
    pub const fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches a store-generated identifier, producing the persisted entry.
    #[must_use]
    pub fn into_entry(self, id: ContextEntryId) -> ContextEntry {
        ContextEntry::from_persisted(PersistedContextEntryData {
            id,
            user_id: self.user_id,
            content: self.content,
            entry_type: self.entry_type,
            entry_date: self.entry_date,
            created_at: self.created_at,
        })
    }
}
