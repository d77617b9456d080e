//! Cache key generators for consistent key naming.

use userhub_core::UserId;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "userhub:cache";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{CACHE_PREFIX}:user:id:{id}")
}
