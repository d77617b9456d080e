//! User service trait definition.

use crate::dto::{ListUsersQuery, UserDto, UserInput, UserWithRoleDto};
use async_trait::async_trait;
use userhub_core::{HubResult, Interface, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists users: filter by search term, sort, then page.
    async fn list_users(&self, query: ListUsersQuery) -> HubResult<Vec<UserDto>>;

    /// Looks a user up through the cache tiers, falling back to the store.
    ///
    /// A missing user is `Ok(None)`.
    async fn get_user(&self, id: UserId) -> HubResult<Option<UserDto>>;

    /// Creates a user and returns it.
    async fn add_user(&self, input: UserInput) -> HubResult<UserDto>;

    /// Replaces an existing user. `input.id` is required.
    async fn update_user(&self, input: UserInput) -> HubResult<()>;

    /// Deletes a user. Deleting an unknown id succeeds.
    async fn delete_user(&self, id: UserId) -> HubResult<()>;

    /// Lists every user with its role aggregate.
    async fn list_users_with_roles(&self) -> HubResult<Vec<UserWithRoleDto>>;

    /// Gets one user with its role aggregate.
    async fn get_user_with_role(&self, id: UserId) -> HubResult<Option<UserWithRoleDto>>;

    /// Lists users carrying the given role label.
    async fn list_users_by_role(&self, role: &str) -> HubResult<Vec<UserDto>>;
}
