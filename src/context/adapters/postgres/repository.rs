//! `PostgreSQL` repository implementation for context entries.

use super::{
    models::{ContextEntryRow, NewContextEntryRow},
    schema::context_entries,
};
use crate::context::{
    domain::{
        ContextContent, ContextEntry, ContextEntryId, EntryType, NewContextEntry,
        PersistedContextEntryData,
    },
    ports::{ContextRepository, ContextRepositoryError, ContextRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by context adapters.
pub type ContextPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed context repository.
#[derive(Debug, Clone)]
pub struct PostgresContextRepository {
    pool: ContextPgPool,
}

impl PostgresContextRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: ContextPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ContextRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ContextRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ContextRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ContextRepositoryError::persistence)?
    }
}

#[async_trait]
impl ContextRepository for PostgresContextRepository {
    async fn create(&self, entry: NewContextEntry) -> ContextRepositoryResult<ContextEntry> {
        let user_id = entry.user_id();
        let new_row = NewContextEntryRow {
            user_id: user_id.value(),
            content: entry.content().as_str().to_owned(),
            entry_type: entry.entry_type().as_str().to_owned(),
            entry_date: entry.entry_date(),
            created_at: entry.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(context_entries::table)
                .values(&new_row)
                .returning(ContextEntryRow::as_returning())
                .get_result::<ContextEntryRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        ContextRepositoryError::UnknownUser(user_id)
                    }
                    _ => ContextRepositoryError::persistence(err),
                })?;
            row_to_entry(row)
        })
        .await
    }

    async fn list_since(
        &self,
        user_id: UserId,
        since: NaiveDate,
    ) -> ContextRepositoryResult<Vec<ContextEntry>> {
        self.run_blocking(move |connection| {
            let rows = context_entries::table
                .filter(context_entries::user_id.eq(user_id.value()))
                .filter(context_entries::entry_date.ge(since))
                .order((
                    context_entries::entry_date.desc(),
                    context_entries::created_at.desc(),
                    context_entries::id.desc(),
                ))
                .select(ContextEntryRow::as_select())
                .load::<ContextEntryRow>(connection)
                .map_err(ContextRepositoryError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn row_to_entry(row: ContextEntryRow) -> ContextRepositoryResult<ContextEntry> {
    let data = PersistedContextEntryData {
        id: ContextEntryId::new(row.id).map_err(ContextRepositoryError::persistence)?,
        user_id: UserId::new(row.user_id).map_err(ContextRepositoryError::persistence)?,
        content: ContextContent::new(row.content).map_err(ContextRepositoryError::persistence)?,
        entry_type: EntryType::try_from(row.entry_type.as_str())
            .map_err(ContextRepositoryError::persistence)?,
        entry_date: row.entry_date,
        created_at: row.created_at,
    };
    Ok(ContextEntry::from_persisted(data))
}
