//! MySQL user repository implementation.

use super::table::{MySqlEntity, MySqlQuery, MySqlRepository, TrackedRepository};
use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySql, Transaction};
use std::sync::Arc;
use tracing::debug;
use userhub_core::{HubError, HubResult, Repository, Role, User, UserId, UserWithRole};
use uuid::Uuid;

/// Database row representation of a user.
#[derive(Debug, FromRow)]
pub struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    user_name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = HubError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| HubError::Internal(format!("Invalid UUID in database: {e}")))?;

        Ok(User {
            id: UserId::from_uuid(id),
            user_name: row.user_name,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A user row joined with its (optional) role row.
#[derive(Debug, FromRow)]
struct UserWithRoleRow {
    #[sqlx(flatten)]
    user: UserRow,
    role_name: Option<String>,
    role_description: Option<String>,
}

impl TryFrom<UserWithRoleRow> for UserWithRole {
    type Error = HubError;

    fn try_from(row: UserWithRoleRow) -> Result<Self, Self::Error> {
        Ok(UserWithRole {
            user: User::try_from(row.user)?,
            role: row.role_name.map(|name| Role::new(name, row.role_description)),
        })
    }
}

/// Database row representation of a role.
#[derive(Debug, FromRow)]
struct RoleRow {
    name: String,
    description: Option<String>,
}

impl MySqlEntity for User {
    type Id = UserId;
    type Row = UserRow;

    const TABLE: &'static str = "users";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "user_name",
        "email",
        "password_hash",
        "role",
        "created_at",
        "updated_at",
    ];
    const UPDATE_COLUMNS: &'static [&'static str] =
        &["user_name", "email", "password_hash", "role", "updated_at"];

    fn from_row(row: Self::Row) -> HubResult<Self> {
        User::try_from(row)
    }

    fn key(&self) -> Self::Id {
        self.id
    }

    fn bind_insert<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.id.to_string())
            .bind(self.user_name.clone())
            .bind(self.email.clone())
            .bind(self.password_hash.clone())
            .bind(self.role.clone())
            .bind(self.created_at)
            .bind(self.updated_at)
    }

    fn bind_update<'q>(&self, query: MySqlQuery<'q>) -> MySqlQuery<'q> {
        query
            .bind(self.user_name.clone())
            .bind(self.email.clone())
            .bind(self.password_hash.clone())
            .bind(self.role.clone())
            .bind(Utc::now())
    }
}

const USERS_WITH_ROLES_SQL: &str = r"
    SELECT u.id, u.user_name, u.email, u.password_hash, u.role, u.created_at, u.updated_at,
           r.name AS role_name, r.description AS role_description
    FROM users u
    LEFT JOIN roles r ON r.name = u.role
";

/// MySQL user repository.
///
/// Writes are staged on the inner generic repository and applied by the
/// owning unit of work.
pub struct MySqlUserRepository {
    inner: MySqlRepository<User>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self {
            inner: MySqlRepository::new(pool),
        }
    }

    async fn load_role(&self, name: &str) -> HubResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>("SELECT name, description FROM roles WHERE name = ?")
            .bind(name)
            .fetch_optional(self.inner.pool().inner())
            .await?;

        Ok(row.map(|r| Role::new(r.name, r.description)))
    }
}

#[async_trait]
impl Repository<User, UserId> for MySqlUserRepository {
    async fn get_all(&self) -> HubResult<Vec<User>> {
        self.inner.get_all().await
    }

    async fn get_by_id(&self, id: &UserId) -> HubResult<Option<User>> {
        self.inner.get_by_id(id).await
    }

    async fn add(&self, entity: User) -> HubResult<()> {
        self.inner.add(entity).await
    }

    async fn update(&self, entity: User) -> HubResult<()> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: &UserId) -> HubResult<()> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn get_users_with_roles(&self) -> HubResult<Vec<UserWithRole>> {
        debug!("Fetching all users with roles");

        let rows = sqlx::query_as::<_, UserWithRoleRow>(USERS_WITH_ROLES_SQL)
            .fetch_all(self.inner.pool().inner())
            .await?;

        rows.into_iter().map(UserWithRole::try_from).collect()
    }

    async fn get_user_with_role(&self, id: &UserId) -> HubResult<Option<UserWithRole>> {
        debug!("Fetching user {} and loading its role", id);

        let Some(user) = self.inner.get_by_id(id).await? else {
            return Ok(None);
        };
        let role = self.load_role(&user.role).await?;

        Ok(Some(UserWithRole { user, role }))
    }

    async fn get_users_by_role(&self, role: &str) -> HubResult<Vec<User>> {
        debug!("Fetching users by role: {}", role);

        let sql = format!(
            "SELECT {} FROM users WHERE role = ?",
            <User as MySqlEntity>::COLUMNS.join(", ")
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role)
            .fetch_all(self.inner.pool().inner())
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }
}

#[async_trait]
impl TrackedRepository for MySqlUserRepository {
    fn pending(&self) -> usize {
        self.inner.pending()
    }

    async fn flush(&self, tx: &mut Transaction<'static, MySql>) -> HubResult<u64> {
        self.inner.flush(tx).await
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mysql::table::{delete_sql, insert_sql, select_by_key_sql, update_sql};

    #[test]
    fn test_insert_sql_lists_every_column() {
        assert_eq!(
            insert_sql::<User>(),
            "INSERT INTO users (id, user_name, email, password_hash, role, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)"
        );
    }

    #[test]
    fn test_update_sql_keeps_created_at() {
        let sql = update_sql::<User>();
        assert_eq!(
            sql,
            "UPDATE users SET user_name = ?, email = ?, password_hash = ?, role = ?, updated_at = ? WHERE id = ?"
        );
        assert!(!sql.contains("created_at"));
    }

    #[test]
    fn test_select_and_delete_sql() {
        assert!(select_by_key_sql::<User>().ends_with("FROM users WHERE id = ?"));
        assert_eq!(delete_sql::<User>(), "DELETE FROM users WHERE id = ?");
    }

    #[test]
    fn test_row_conversion() {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let row = UserRow {
            id: id.to_string(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$x".to_string(),
            role: "admin".to_string(),
            created_at: now,
            updated_at: now,
        };

        let user = User::try_from(row).unwrap();
        assert_eq!(user.id, UserId::from_uuid(id));
        assert_eq!(user.role, "admin");
    }

    #[test]
    fn test_row_conversion_rejects_bad_uuid() {
        let now = Utc::now();
        let row = UserRow {
            id: "garbage".to_string(),
            user_name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "h".to_string(),
            role: "user".to_string(),
            created_at: now,
            updated_at: now,
        };

        assert!(User::try_from(row).is_err());
    }

    #[test]
    fn test_joined_row_without_role() {
        let now = Utc::now();
        let row = UserWithRoleRow {
            user: UserRow {
                id: Uuid::now_v7().to_string(),
                user_name: "bob".to_string(),
                email: "bob@example.com".to_string(),
                password_hash: "h".to_string(),
                role: "ghost".to_string(),
                created_at: now,
                updated_at: now,
            },
            role_name: None,
            role_description: None,
        };

        let loaded = UserWithRole::try_from(row).unwrap();
        assert_eq!(loaded.user.role, "ghost");
        assert!(loaded.role.is_none());
    }
}
