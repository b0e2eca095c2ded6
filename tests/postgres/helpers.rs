//! Shared helpers for `PostgreSQL` integration tests.

use crate::test_helpers::FixedClock;
use smart_todo::database::{PgPool, connect, migrate};
use smart_todo::user::{
    adapters::postgres::PostgresUserRepository,
    domain::{EmailAddress, NewUser, User, UserName},
    ports::UserRepository,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable naming the test database.
pub const DATABASE_URL_VAR: &str = "SMART_TODO_TEST_DATABASE_URL";

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// Connects to and migrates the test database, or returns `None` when no
/// database is configured.
pub async fn database() -> Option<PgPool> {
    let url = std::env::var(DATABASE_URL_VAR).ok()?;
    let pool = connect(&url, 2).expect("test database should accept connections");
    migrate(&pool).await.expect("schema should apply");
    Some(pool)
}

/// Returns an email address no other test run has used.
pub fn unique_email(label: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{label}-{}-{nanos}-{sequence}@example.com",
        std::process::id()
    )
}

/// Stores a fresh user to own the records a test writes.
pub async fn provision_user(pool: &PgPool, clock: &FixedClock) -> User {
    let repo = PostgresUserRepository::new(pool.clone());
    repo.create(NewUser::new(
        EmailAddress::new(unique_email("owner")).expect("valid email"),
        UserName::new("Integration Owner").expect("valid name"),
        clock,
    ))
    .await
    .expect("user should be stored")
}
