//! In-process cache used for local development and tests.

use super::{CacheInterface, DEFAULT_TTL};
use catalog_core::CatalogResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Cache backed by a process-local map.
///
/// Expiry is measured on the Tokio clock, so paused-time tests can drive it
/// with `tokio::time::advance`. Expired entries are dropped on access, and
/// every write purges whatever else has expired so unread keys do not pile up.
pub struct InMemoryCacheService {
    entries: Mutex<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl InMemoryCacheService {
    /// Creates an empty cache with the default TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates an empty cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true if no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored entries, expired or not.
    #[cfg(test)]
    fn stored(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Default for InMemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCacheService {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + ttl,
        };
        let mut entries = self.entries.lock();
        entries.retain(|_, e| e.is_live(now));
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .lock()
            .remove(key)
            .is_some_and(|entry| entry.is_live(now)))
    }

    async fn exists(&self, key: &str) -> CatalogResult<bool> {
        Ok(self.get_raw(key).await?.is_some())
    }

    async fn ping(&self) -> CatalogResult<()> {
        Ok(())
    }

    fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}
