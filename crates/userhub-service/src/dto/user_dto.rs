//! User-related DTOs.

use serde::{Deserialize, Serialize};
use userhub_core::{Role, UserId};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// User read model.
///
/// This is what lookups return and what both cache tiers hold. It never
/// carries a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: String,
}

/// User write model for create and full-replace update.
#[derive(Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    /// Optional on create; a fresh identifier is generated when absent.
    #[serde(default)]
    pub id: Option<UserId>,

    #[validate(
        length(min = 1, max = 50, message = "User name must be 1-50 characters"),
        custom(function = "userhub_core::rules::not_blank", message = "User name is required")
    )]
    pub user_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Plaintext credential. Hashed before it reaches the store.
    #[serde(alias = "passwordHash")]
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(write_only)]
    pub password: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Role must be 1-50 characters"))]
    pub role: Option<String>,
}

impl std::fmt::Debug for UserInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInput")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// A user together with its role aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithRoleDto {
    pub user: UserDto,
    /// `None` when the role label has no matching role row.
    pub role_details: Option<Role>,
}

/// Sort column for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    UserName,
    Email,
}

/// Query parameters for user listings.
#[derive(Debug, Clone, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Case-insensitive substring matched against user name and email.
    pub search_term: Option<String>,

    /// `UserName` or `Email`; anything else sorts by name ascending.
    pub sort_by: String,

    pub ascending: bool,

    /// 1-based page number.
    pub page: i64,

    pub page_size: i64,
}

impl Default for ListUsersQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            sort_by: "UserName".to_string(),
            ascending: true,
            page: 1,
            page_size: 10,
        }
    }
}

impl ListUsersQuery {
    /// Resolves the sort column and direction.
    ///
    /// Unrecognized keys fall back to user name, ascending, whatever the
    /// `ascending` flag says.
    #[must_use]
    pub fn sort(&self) -> (SortKey, bool) {
        match self.sort_by.as_str() {
            "UserName" => (SortKey::UserName, self.ascending),
            "Email" => (SortKey::Email, self.ascending),
            _ => (SortKey::UserName, true),
        }
    }

    /// The search term as sent, or `None` when blank. Surrounding
    /// whitespace is part of the match.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|term| !term.trim().is_empty())
    }

    /// Rows to skip: `(page - 1) * page_size`, never negative.
    #[must_use]
    pub fn skip(&self) -> usize {
        let skip = self.page.saturating_sub(1).saturating_mul(self.page_size);
        usize::try_from(skip).unwrap_or(0)
    }

    /// Rows to take: `page_size`, or zero when not positive.
    #[must_use]
    pub fn take(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_core::ValidateExt;

    fn input() -> UserInput {
        UserInput {
            id: None,
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            role: None,
        }
    }

    #[test]
    fn test_user_dto_serializes_camel_case() {
        let dto = UserDto {
            id: UserId::new(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: "admin".to_string(),
        };

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["userName"], "alice");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn test_user_input_accepts_password_hash_alias() {
        let input: UserInput = serde_json::from_str(
            r#"{"userName":"bob","email":"bob@example.com","passwordHash":"pw"}"#,
        )
        .unwrap();

        assert_eq!(input.password, "pw");
        assert!(input.id.is_none());
        assert!(input.role.is_none());
    }

    #[test]
    fn test_user_input_validation() {
        assert!(input().validate_request().is_ok());

        let mut long_name = input();
        long_name.user_name = "x".repeat(51);
        assert!(long_name.validate_request().is_err());

        let mut blank_name = input();
        blank_name.user_name = "   ".to_string();
        assert!(blank_name.validate_request().is_err());

        let mut bad_email = input();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate_request().is_err());

        let mut no_password = input();
        no_password.password = String::new();
        assert!(no_password.validate_request().is_err());
    }

    #[test]
    fn test_user_input_debug_redacts_password() {
        let rendered = format!("{:?}", input());
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_query_defaults() {
        let query: ListUsersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sort(), (SortKey::UserName, true));
        assert_eq!(query.skip(), 0);
        assert_eq!(query.take(), 10);
        assert!(query.search().is_none());
    }

    #[test]
    fn test_unknown_sort_key_ignores_direction() {
        let query = ListUsersQuery {
            sort_by: "CreatedAt".to_string(),
            ascending: false,
            ..ListUsersQuery::default()
        };
        assert_eq!(query.sort(), (SortKey::UserName, true));

        let query = ListUsersQuery {
            sort_by: "Email".to_string(),
            ascending: false,
            ..ListUsersQuery::default()
        };
        assert_eq!(query.sort(), (SortKey::Email, false));
    }

    #[test]
    fn test_paging_edges() {
        let query = ListUsersQuery {
            page: 3,
            page_size: 10,
            ..ListUsersQuery::default()
        };
        assert_eq!((query.skip(), query.take()), (20, 10));

        let query = ListUsersQuery {
            page: 0,
            page_size: 10,
            ..ListUsersQuery::default()
        };
        assert_eq!(query.skip(), 0);

        let query = ListUsersQuery {
            page: 2,
            page_size: -5,
            ..ListUsersQuery::default()
        };
        assert_eq!(query.take(), 0);
    }

    #[test]
    fn test_blank_search_term_is_no_filter() {
        let query = ListUsersQuery {
            search_term: Some("  ".to_string()),
            ..ListUsersQuery::default()
        };
        assert!(query.search().is_none());
    }

    #[test]
    fn test_search_term_is_not_trimmed() {
        let query = ListUsersQuery {
            search_term: Some(" ali".to_string()),
            ..ListUsersQuery::default()
        };
        assert_eq!(query.search(), Some(" ali"));
    }
}
