//! In-process cache tier backed by moka.

use crate::dto::UserDto;
use async_trait::async_trait;
use moka::future::Cache;
use shaku::{Component, Interface};
use std::time::Duration;
use tracing::debug;
use userhub_core::HubResult;

/// In-process cache of user read models.
#[async_trait]
pub trait LocalCacheInterface: Interface + Send + Sync {
    /// Get a value, `None` if absent or expired.
    async fn get(&self, key: &str) -> HubResult<Option<UserDto>>;

    /// Insert a value. Last write wins.
    async fn insert(&self, key: &str, value: UserDto) -> HubResult<()>;

    /// Remove a value if present.
    async fn invalidate(&self, key: &str) -> HubResult<()>;
}

/// Moka-backed local tier.
///
/// Every entry weighs 1 against `capacity` and expires a fixed time after
/// insertion, regardless of how often it is read.
#[derive(Component, Clone)]
#[shaku(interface = LocalCacheInterface)]
pub struct MokaLocalCache {
    cache: Cache<String, UserDto>,
}

impl MokaLocalCache {
    /// Create a local tier holding up to `capacity` entries for `ttl` each.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .weigher(|_key: &String, _value: &UserDto| -> u32 { 1 })
            .time_to_live(ttl)
            .build();

        debug!(
            max_capacity = capacity,
            ttl_seconds = ttl.as_secs(),
            "Local user cache created"
        );

        Self { cache }
    }

    /// The underlying moka cache, used as a shaku component parameter.
    #[must_use]
    pub fn cache(&self) -> Cache<String, UserDto> {
        self.cache.clone()
    }
}

#[async_trait]
impl LocalCacheInterface for MokaLocalCache {
    async fn get(&self, key: &str) -> HubResult<Option<UserDto>> {
        let value = self.cache.get(key).await;

        match &value {
            Some(_) => debug!("Local cache hit for key '{}'", key),
            None => debug!("Local cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn insert(&self, key: &str, value: UserDto) -> HubResult<()> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> HubResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }
}

impl std::fmt::Debug for MokaLocalCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaLocalCache")
            .field("max_capacity", &self.cache.policy().max_capacity())
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
