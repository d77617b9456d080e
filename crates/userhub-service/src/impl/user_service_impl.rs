//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, LocalCacheInterface};
use crate::dto::{ListUsersQuery, SortKey, UserDto, UserInput, UserWithRoleDto};
use crate::mappers::UserMapper;
use crate::user_service::UserService;
use async_trait::async_trait;
use shaku::Component;
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};
use userhub_config::CacheConfig;
use userhub_core::{HubError, HubResult, Repository, User, UserId, ValidateExt};
use userhub_repository::UnitOfWorkFactory;
use userhub_security::PasswordHasherInterface;

/// Cache behavior of the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Absolute expiration of distributed entries.
    pub distributed_ttl: Duration,
    /// Evict both tiers after update and delete.
    pub evict_on_write: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            distributed_ttl: config.distributed_ttl(),
            evict_on_write: config.evict_on_write,
        }
    }
}

/// User service component for Shaku DI.
///
/// Every call begins its own unit of work, so staged writes never leak
/// between requests.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    unit_of_work: Arc<dyn UnitOfWorkFactory>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    local_cache: Arc<dyn LocalCacheInterface>,
    #[shaku(inject)]
    distributed_cache: Arc<dyn CacheInterface>,
    settings: CacheSettings,
}

impl UserServiceComponent {
    /// Creates a service from explicit collaborators.
    #[must_use]
    pub fn new(
        unit_of_work: Arc<dyn UnitOfWorkFactory>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        local_cache: Arc<dyn LocalCacheInterface>,
        distributed_cache: Arc<dyn CacheInterface>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            unit_of_work,
            password_hasher,
            local_cache,
            distributed_cache,
            settings,
        }
    }

    async fn evict(&self, id: UserId) -> HubResult<()> {
        if !self.settings.evict_on_write {
            return Ok(());
        }

        let key = cache_keys::user_by_id(id);
        self.distributed_cache.delete(&key).await?;
        self.local_cache.invalidate(&key).await?;
        debug!("Evicted cached user: {}", id);
        Ok(())
    }
}

fn matches_search(user: &User, term: &str) -> bool {
    user.user_name.to_lowercase().contains(term) || user.email.to_lowercase().contains(term)
}

/// Case-insensitive order, with the raw text breaking ties.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn sort_users(users: &mut [User], key: SortKey, ascending: bool) {
    users.sort_by(|a, b| {
        let ordering = match key {
            SortKey::UserName => compare_text(&a.user_name, &b.user_name),
            SortKey::Email => compare_text(&a.email, &b.email),
        };
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });
}

#[async_trait]
impl UserService for UserServiceComponent {
    #[instrument(skip(self))]
    async fn list_users(&self, query: ListUsersQuery) -> HubResult<Vec<UserDto>> {
        let uow = self.unit_of_work.begin();
        let mut users = uow.users().get_all().await?;

        if let Some(term) = query.search() {
            let term = term.to_lowercase();
            users.retain(|user| matches_search(user, &term));
        }

        let (key, ascending) = query.sort();
        sort_users(&mut users, key, ascending);

        Ok(users
            .into_iter()
            .skip(query.skip())
            .take(query.take())
            .map(UserDto::from)
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> HubResult<Option<UserDto>> {
        let key = cache_keys::user_by_id(id);

        if let Some(cached) = self.distributed_cache.get::<UserDto>(&key).await? {
            debug!("Distributed cache answered for user: {}", id);
            return Ok(Some(cached));
        }

        if let Some(cached) = self.local_cache.get(&key).await? {
            debug!("Local cache answered for user: {}", id);
            return Ok(Some(cached));
        }

        let uow = self.unit_of_work.begin();
        let Some(user) = uow.users().get_by_id(&id).await? else {
            debug!("User not found: {}", id);
            return Ok(None);
        };

        let dto = UserDto::from(user);
        self.local_cache.insert(&key, dto.clone()).await?;
        self.distributed_cache
            .set(&key, &dto, self.settings.distributed_ttl)
            .await?;

        Ok(Some(dto))
    }

    #[instrument(skip(self, input), fields(user_name = %input.user_name))]
    async fn add_user(&self, input: UserInput) -> HubResult<UserDto> {
        input.validate_request()?;

        let password_hash = self.password_hasher.hash(&input.password)?;
        let user = UserMapper::to_entity(input, password_hash);
        let dto = UserDto::from(user.clone());

        let uow = self.unit_of_work.begin();
        uow.users().add(user).await?;
        uow.complete().await?;

        info!("User created: {}", dto.id);
        Ok(dto)
    }

    #[instrument(skip(self, input), fields(id = ?input.id))]
    async fn update_user(&self, input: UserInput) -> HubResult<()> {
        let id = input
            .id
            .filter(|id| !id.is_nil())
            .ok_or_else(|| HubError::validation("id: User id is required for update"))?;
        input.validate_request()?;

        let uow = self.unit_of_work.begin();
        if uow.users().get_by_id(&id).await?.is_none() {
            return Err(HubError::not_found("User", id));
        }

        let password_hash = self.password_hasher.hash(&input.password)?;
        uow.users()
            .update(UserMapper::to_entity(input, password_hash))
            .await?;
        uow.complete().await?;

        self.evict(id).await?;

        info!("User updated: {}", id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> HubResult<()> {
        let uow = self.unit_of_work.begin();
        uow.users().delete(&id).await?;
        let affected = uow.complete().await?;

        self.evict(id).await?;

        info!("User deleted: {} ({} rows)", id, affected);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_users_with_roles(&self) -> HubResult<Vec<UserWithRoleDto>> {
        let uow = self.unit_of_work.begin();
        let users = uow.users().get_users_with_roles().await?;
        Ok(users.into_iter().map(UserWithRoleDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_user_with_role(&self, id: UserId) -> HubResult<Option<UserWithRoleDto>> {
        let uow = self.unit_of_work.begin();
        let user = uow.users().get_user_with_role(&id).await?;
        Ok(user.map(UserWithRoleDto::from))
    }

    #[instrument(skip(self))]
    async fn list_users_by_role(&self, role: &str) -> HubResult<Vec<UserDto>> {
        let uow = self.unit_of_work.begin();
        let users = uow.users().get_users_by_role(role).await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
