//! User entity.

use super::{EmailAddress, UserId, UserName};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A persisted task owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: UserName,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Store-generated identifier.
    pub id: UserId,
    /// Unique email address.
    pub email: EmailAddress,
    /// Display name.
    pub name: UserName,
    /// Provisioning timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            name: data.name,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Returns the provisioning timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: EmailAddress,
    name: UserName,
    created_at: DateTime<Utc>,
}

impl NewUser {
    /// Creates an unsaved user stamped with the current clock time.
    #[must_use]
    pub fn new(email: EmailAddress, name: UserName, clock: &impl Clock) -> Self {
        Self {
            email,
            name,
            created_at: clock.utc(),
        }
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &UserName {
        &self.name
    }

    /// Returns the provisioning timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches a store-generated identifier, producing the persisted user.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User::from_persisted(PersistedUserData {
            id,
            email: self.email,
            name: self.name,
            created_at: self.created_at,
        })
    }
}
