//! `PostgreSQL` adapters for context persistence.

mod models;
mod repository;
mod schema;

pub use repository::{ContextPgPool, PostgresContextRepository};
