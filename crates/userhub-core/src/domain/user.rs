//! User entity.

use super::role::{Role, DEFAULT_ROLE};
use crate::UserId;
use chrono::{DateTime, Utc};
use std::fmt;

/// User row as stored in the relational store.
///
/// `password_hash` always holds a one-way hash; plaintext credentials never
/// reach this type.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Display name, searchable.
    pub user_name: String,

    /// Email address, searchable.
    pub email: String,

    /// One-way password hash.
    pub password_hash: String,

    /// Role label, referencing [`Role::name`].
    pub role: String,

    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a fresh identifier.
    #[must_use]
    pub fn new(user_name: String, email: String, password_hash: String, role: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            user_name,
            email,
            password_hash,
            role: role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// A user with its role aggregate eagerly loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithRole {
    /// The user row.
    pub user: User,

    /// The referenced role, `None` when the label has no matching role row.
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$argon2id$hash".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_user_defaults_role() {
        let user = sample();
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_with_id_replaces_identifier() {
        let id = UserId::new();
        let user = sample().with_id(id);
        assert_eq!(user.id, id);
    }

    #[test]
    fn test_debug_redacts_password_hash() {
        let rendered = format!("{:?}", sample());
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("$argon2id$hash"));
    }
}
