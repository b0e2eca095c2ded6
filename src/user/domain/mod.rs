//! Domain model for task owners.

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::{EmailAddress, UserId, UserName};
pub use user::{NewUser, PersistedUserData, User};
