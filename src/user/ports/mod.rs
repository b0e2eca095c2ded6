//! Port contracts for user provisioning and lookup.

pub mod repository;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
