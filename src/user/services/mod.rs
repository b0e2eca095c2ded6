//! Application services for user provisioning.

mod directory;

pub use directory::{RegisterUserRequest, UserDirectoryError, UserDirectoryService};
