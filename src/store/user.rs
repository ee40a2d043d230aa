//! User model types

use serde::{Deserialize, Serialize};

/// A user record
///
/// Owned by the store; pipelines receive clones and never mutate stored
/// entries in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact address
    pub contact: String,
}

impl User {
    /// Create a new user
    pub fn new(id: impl Into<String>, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: contact.into(),
        }
    }

    /// The substitute value returned by the fallback pipeline when a lookup
    /// finds nothing
    pub fn fallback_default() -> Self {
        Self::new("default", "Default User", "default@example.com")
    }

    /// The indicator value returned by the retry pipeline after exhausting
    /// its attempts
    pub fn retry_exhausted() -> Self {
        Self::new("error", "Error User", "error@example.com")
    }
}

/// Reduced-field projection of a [`User`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl UserSummary {
    /// Project a user down to its summary fields
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}
