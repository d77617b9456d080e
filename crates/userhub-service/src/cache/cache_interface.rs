//! Distributed cache tier interface.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use userhub_core::HubResult;

/// Distributed cache holding JSON-encoded values.
///
/// Values cross the trait as JSON strings so it stays dyn-compatible; use
/// [`CacheExt`] for typed access.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value, `None` if the key is absent or expired.
    async fn get_raw(&self, key: &str) -> HubResult<Option<String>>;

    /// Set a raw JSON value with an absolute TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> HubResult<()>;

    /// Delete a value. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> HubResult<bool>;

    /// Whether the tier is backed by a live store.
    fn is_enabled(&self) -> bool;
}

/// Typed get/set over [`CacheInterface`].
///
/// Decode and encode failures are returned to the caller, not swallowed.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get and decode a value.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> HubResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Encode and set a value.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> HubResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
