//! Caching infrastructure for the service layer.
//!
//! [`CacheInterface`] abstracts the key-value store, with a Redis
//! implementation for deployments and an in-memory one for development and
//! tests. [`CacheAside`] layers the read/write consistency policy on top.

mod cache_aside;
mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_aside::CacheAside;
pub use cache_interface::{CacheExt, CacheHealthCheck, CacheInterface};
pub use cache_keys::CacheKeys;
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
