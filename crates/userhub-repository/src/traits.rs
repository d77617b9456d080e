//! Repository and unit-of-work trait definitions.

use async_trait::async_trait;
use userhub_core::{HubResult, Interface, Repository, User, UserId, UserWithRole};

/// User repository: generic CRUD plus role-aware reads.
#[async_trait]
pub trait UserRepository: Repository<User, UserId> + Send + Sync {
    /// Fetches every user with its role aggregate eagerly loaded.
    async fn get_users_with_roles(&self) -> HubResult<Vec<UserWithRole>>;

    /// Fetches one user, then explicitly loads its role aggregate.
    async fn get_user_with_role(&self, id: &UserId) -> HubResult<Option<UserWithRole>>;

    /// Fetches users whose role label equals `role`.
    async fn get_users_by_role(&self, role: &str) -> HubResult<Vec<User>>;
}

/// Aggregates repositories behind a single commit.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// The user repository bound to this unit of work.
    fn users(&self) -> &dyn UserRepository;

    /// Flushes every staged change in one transaction.
    ///
    /// Returns the number of affected rows.
    async fn complete(&self) -> HubResult<u64>;
}

/// Hands out a fresh unit of work per service call.
pub trait UnitOfWorkFactory: Interface + Send + Sync {
    /// Starts a new unit of work.
    fn begin(&self) -> Box<dyn UnitOfWork>;
}
