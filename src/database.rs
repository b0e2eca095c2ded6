//! `PostgreSQL` connection pooling and schema migration.
//!
//! The SQL under `migrations/` is embedded into the binary and applied with
//! `IF NOT EXISTS` guards, so running [`migrate`] against an already
//! provisioned database is a no-op.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;
use tracing::info;

/// Connection pool shared by every `PostgreSQL` adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Core schema: users, tasks, and context entries with their indexes.
pub const CREATE_CORE_TABLES_SQL: &str =
    include_str!("../migrations/2026-01-10-000000_create_core_tables/up.sql");

/// Errors raised while connecting to or preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The pool could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] PoolError),

    /// Checking a connection out of the pool failed.
    #[error("failed to acquire connection: {0}")]
    Connection(#[source] PoolError),

    /// A migration statement failed.
    #[error("migration failed: {0}")]
    Migration(#[from] diesel::result::Error),

    /// The blocking migration task was cancelled or panicked.
    #[error("migration task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`DatabaseError::Pool`] when the pool cannot establish its
/// initial connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, DatabaseError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder().max_size(max_size).build(manager)?;
    info!(max_size, "database pool ready");
    Ok(pool)
}

/// Applies the embedded schema.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or a statement
/// fails.
pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
    let owned = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = owned.get().map_err(DatabaseError::Connection)?;
        connection.batch_execute(CREATE_CORE_TABLES_SQL)?;
        Ok::<(), DatabaseError>(())
    })
    .await??;
    info!("database schema is up to date");
    Ok(())
}
