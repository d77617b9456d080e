//! Role aggregate referenced by a user's role label.

use serde::{Deserialize, Serialize};

/// Label given to users created without an explicit role.
pub const DEFAULT_ROLE: &str = "user";

/// A role row, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Role {
    /// Role name; users reference it through their role label.
    pub name: String,

    /// Human-readable description.
    pub description: Option<String>,
}

impl Role {
    /// Creates a new role.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}
