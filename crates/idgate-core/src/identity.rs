//! # Verified Identity
//!
//! The principal resolved by delegating a bearer token to the upstream
//! identity service. An `Identity` is only ever built from a user record the
//! upstream vouched for; it has no setters, so downstream consumers can read
//! it but never alter it.

use serde::{Deserialize, Serialize};

use crate::user::{User, UserId};

/// Immutable, verified principal.
///
/// Serializes exactly like the wrapped [`User`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(User);

impl Identity {
    /// Upstream user identifier.
    pub fn id(&self) -> UserId {
        self.0.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.0.profile.name
    }

    /// SAP employee reference, if the user has one.
    pub fn sap_employee_id(&self) -> Option<i64> {
        self.0.profile.sap_employee_id
    }

    /// Full upstream record.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Unwrap into the upstream record.
    pub fn into_user(self) -> User {
        self.0
    }
}

impl From<User> for Identity {
    fn from(user: User) -> Self {
        Self(user)
    }
}
