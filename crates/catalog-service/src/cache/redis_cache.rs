//! Redis-based cache implementation.

use super::CacheInterface;
use catalog_core::{CatalogError, CatalogResult};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default TTL for cached items.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5000);

/// Redis-based cache service.
///
/// Every write uses `SETEX`, so entries expire on the server side.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
    /// TTL applied to every write.
    #[shaku(default = DEFAULT_TTL)]
    default_ttl: Duration,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self::with_ttl(pool, DEFAULT_TTL)
    }

    /// Create a cache service with a custom default TTL.
    #[must_use]
    pub fn with_ttl(pool: Arc<Pool>, default_ttl: Duration) -> Self {
        Self {
            pool: Some(pool),
            default_ttl,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| CatalogError::cache(format!("Failed to get Redis connection: {}", e))),
            None => Err(CatalogError::cache("Redis pool not configured")),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CatalogError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| CatalogError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CatalogError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> CatalogResult<bool> {
        let mut conn = self.get_conn().await?;
        let exists: bool = conn
            .exists(key)
            .await
            .map_err(|e| CatalogError::cache(format!("Failed to check key '{}': {}", key, e)))?;

        Ok(exists)
    }

    async fn ping(&self) -> CatalogResult<()> {
        let mut conn = self.get_conn().await?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CatalogError::cache(format!("Redis ping failed: {}", e)))?;
        Ok(())
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
