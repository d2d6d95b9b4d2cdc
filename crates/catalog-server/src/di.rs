//! Dependency injection module using Shaku.

use catalog_config::{AppConfig, CacheBackend, RedisConfig};
use catalog_core::{CatalogError, CatalogResult};
use catalog_repository::{
    MongoComponentRepository, MongoConnection, MongoConnectionInterface,
    MongoConnectionParameters, MongoManufacturerRepository, MongoProductRepository,
};
use catalog_service::{
    CacheInterface, ComponentService, ComponentServiceComponent, InMemoryCacheService,
    ManufacturerService, ManufacturerServiceComponent, ProductService, ProductServiceComponent,
    RedisCacheService, RedisCacheServiceParameters,
};
use deadpool_redis::{Config as RedisPoolConfig, Pool, PoolConfig, Runtime};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// Full catalog stack: MongoDB connection and repositories, the cache, and
// the three services layered on top of them.
module! {
    pub CatalogModule {
        components = [
            MongoConnection,
            MongoProductRepository,
            MongoManufacturerRepository,
            MongoComponentRepository,
            RedisCacheService,
            ProductServiceComponent,
            ManufacturerServiceComponent,
            ComponentServiceComponent,
        ],
        providers = [],
    }
}

impl CatalogModule {
    /// Resolves the shared MongoDB connection.
    pub fn connection(&self) -> Arc<dyn MongoConnectionInterface> {
        self.resolve()
    }

    /// Resolves the cache in use.
    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    /// Resolves the product service.
    pub fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    /// Resolves the manufacturer service.
    pub fn manufacturer_service(&self) -> Arc<dyn ManufacturerService> {
        self.resolve()
    }

    /// Resolves the component service.
    pub fn component_service(&self) -> Arc<dyn ComponentService> {
        self.resolve()
    }
}

/// Creates the Redis pool. The pool connects lazily, so this never blocks.
pub fn create_redis_pool(config: &RedisConfig) -> CatalogResult<Pool> {
    let mut redis_cfg = RedisPoolConfig::from_url(&config.url);
    redis_cfg.pool = Some(PoolConfig::new(config.pool_size as usize));
    redis_cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| CatalogError::cache(format!("Failed to create Redis pool: {}", e)))
}

/// Builds the catalog module from a connected MongoDB handle.
///
/// With `cache.backend = "memory"` the Redis cache is replaced by a
/// process-local one and no Redis pool is created.
pub fn build_catalog_module(
    connection: &MongoConnection,
    config: &AppConfig,
) -> CatalogResult<Arc<CatalogModule>> {
    let ttl = config.cache.ttl();

    let mut builder = CatalogModule::builder().with_component_parameters::<MongoConnection>(
        MongoConnectionParameters {
            database: connection.inner().cloned(),
        },
    );

    builder = match config.cache.backend {
        CacheBackend::Redis => {
            let pool = create_redis_pool(&config.redis)?;
            info!("Using Redis cache at {}", config.redis.redacted_url());
            builder.with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
                pool: Some(Arc::new(pool)),
                default_ttl: ttl,
            })
        }
        CacheBackend::Memory => {
            info!("Using in-memory cache");
            builder.with_component_override::<dyn CacheInterface>(Box::new(
                InMemoryCacheService::with_ttl(ttl),
            ))
        }
    };

    Ok(Arc::new(builder.build()))
}
