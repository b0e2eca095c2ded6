//! Service layer for user provisioning and lookup.

use crate::user::{
    domain::{EmailAddress, NewUser, User, UserDomainError, UserName},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Request payload for provisioning a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    email: String,
    name: String,
}

impl RegisterUserRequest {
    /// Creates a request from raw email and display name.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// Service-level errors for user operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User provisioning and lookup service.
pub struct UserDirectoryService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for UserDirectoryService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> UserDirectoryService<R, C>
where
    R: UserRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Looks a user up by exact email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Domain`] for a malformed address and
    /// [`UserDirectoryError::Repository`] when the lookup fails.
    pub async fn find_by_email(&self, email: &str) -> UserDirectoryResult<Option<User>> {
        let address = EmailAddress::new(email)?;
        Ok(self.repository.find_by_email(&address).await?)
    }

    /// Provisions a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] (wrapped) when the
    /// address is taken.
    pub async fn register(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let new_user = Self::build(request, &*self.clock)?;
        Ok(self.repository.create(new_user).await?)
    }

    /// Provisions a user, reusing the existing one when the address is taken.
    ///
    /// Used by seeding paths where a duplicate is expected and harmless.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError`] for validation or persistence failures
    /// other than a duplicate address.
    pub async fn ensure(&self, request: RegisterUserRequest) -> UserDirectoryResult<User> {
        let new_user = Self::build(request, &*self.clock)?;
        let email = new_user.email().clone();
        match self.repository.create(new_user).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::DuplicateEmail(_)) => {
                debug!(email = %email, "user already provisioned");
                self.repository
                    .find_by_email(&email)
                    .await?
                    .ok_or_else(|| UserRepositoryError::DuplicateEmail(email).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn build(request: RegisterUserRequest, clock: &C) -> UserDirectoryResult<NewUser> {
        let RegisterUserRequest { email, name } = request;
        Ok(NewUser::new(
            EmailAddress::new(email)?,
            UserName::new(name)?,
            clock,
        ))
    }
}
