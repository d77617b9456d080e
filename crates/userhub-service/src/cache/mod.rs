//! The two read-cache tiers used by user lookups.
//!
//! - [`LocalCacheInterface`]: in-process, short absolute TTL, unit-weighted
//!   entries ([`MokaLocalCache`]).
//! - [`CacheInterface`]: distributed, JSON values, longer absolute TTL
//!   ([`RedisCacheService`]).

mod cache_interface;
pub mod cache_keys;
mod local_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use local_cache::{LocalCacheInterface, MokaLocalCache, MokaLocalCacheParameters};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
