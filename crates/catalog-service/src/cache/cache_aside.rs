//! Cache-aside accessor shared by every entity service.

use super::{CacheExt, CacheInterface, CacheKeys};
use crate::metrics::CacheMetrics;
use catalog_core::{CatalogResult, Entity, EntityStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read-through/write-refresh access to one entity store.
///
/// Reads check the cache first and populate it on a miss. Writes go to the
/// store, then overwrite or evict the record key and reload the collection
/// key. Store and cache failures propagate unchanged; nothing is retried and
/// the cache is never bypassed on error. Lookups that find nothing are not
/// cached.
pub struct CacheAside<S: ?Sized> {
    store: Arc<S>,
    cache: Arc<dyn CacheInterface>,
    ttl: Duration,
}

impl<S> CacheAside<S>
where
    S: EntityStore + ?Sized,
    S::Item: CacheKeys,
{
    /// Creates an accessor using the cache's default TTL.
    pub fn new(store: Arc<S>, cache: Arc<dyn CacheInterface>) -> Self {
        let ttl = cache.default_ttl();
        Self { store, cache, ttl }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns every entity, from the collection key when present.
    pub async fn get_collection(&self) -> CatalogResult<Vec<S::Item>> {
        let key = <S::Item as CacheKeys>::COLLECTION_KEY;
        if let Some(items) = self.cache.get::<Vec<S::Item>>(key).await? {
            CacheMetrics::hit(key);
            return Ok(items);
        }

        CacheMetrics::miss(key);
        self.load_collection().await
    }

    /// Returns one entity, from its record key when present.
    pub async fn get_by_id(&self, id: &S::Id) -> CatalogResult<Option<S::Item>> {
        let space = <S::Item as CacheKeys>::COLLECTION_KEY;
        let key = <S::Item as CacheKeys>::entity_key(id);
        if let Some(item) = self.cache.get::<S::Item>(&key).await? {
            CacheMetrics::hit(space);
            return Ok(Some(item));
        }

        CacheMetrics::miss(space);
        let found = self.store.find_by_id(id).await?;
        match &found {
            Some(item) => self.cache.set(&key, item, self.ttl).await?,
            None => debug!(
                "{} {} not found, nothing cached",
                <S::Item as Entity>::RESOURCE_TYPE,
                id
            ),
        }
        Ok(found)
    }

    /// Persists a new entity and refreshes the collection key.
    pub async fn create(&self, draft: S::Draft) -> CatalogResult<S::Item> {
        let created = self.store.create(draft).await?;
        self.refresh_collection().await?;
        Ok(created)
    }

    /// Updates an entity and rewrites its record key.
    ///
    /// When the store reports no such record the record key is evicted and
    /// the collection is left alone.
    pub async fn update(&self, id: &S::Id, draft: S::Draft) -> CatalogResult<Option<S::Item>> {
        let updated = self.store.update_by_id(id, draft).await?;
        match &updated {
            Some(item) => {
                self.put_entity(item).await?;
                self.refresh_collection().await?;
            }
            None => self.evict_entity(id).await?,
        }
        Ok(updated)
    }

    /// Deletes an entity and evicts its record key.
    ///
    /// The record key is evicted even when the store had nothing to delete.
    pub async fn delete(&self, id: &S::Id) -> CatalogResult<bool> {
        let removed = self.store.delete_by_id(id).await?;
        self.evict_entity(id).await?;
        if removed {
            self.refresh_collection().await?;
        }
        Ok(removed)
    }

    /// Reloads the collection from the store and rewrites the collection key.
    pub async fn refresh_collection(&self) -> CatalogResult<Vec<S::Item>> {
        CacheMetrics::refresh(<S::Item as CacheKeys>::COLLECTION_KEY);
        self.load_collection().await
    }

    /// Writes an entity to its record key.
    pub async fn put_entity(&self, item: &S::Item) -> CatalogResult<()> {
        let key = <S::Item as CacheKeys>::entity_key(item.id());
        self.cache.set(&key, item, self.ttl).await
    }

    /// Removes an entity's record key.
    pub async fn evict_entity(&self, id: &S::Id) -> CatalogResult<()> {
        let key = <S::Item as CacheKeys>::entity_key(id);
        self.cache.delete(&key).await?;
        Ok(())
    }

    async fn load_collection(&self) -> CatalogResult<Vec<S::Item>> {
        let items = self.store.find_all().await?;
        self.cache
            .set(<S::Item as CacheKeys>::COLLECTION_KEY, &items, self.ttl)
            .await?;
        Ok(items)
    }
}
