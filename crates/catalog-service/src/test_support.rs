//! Fixtures shared by the service tests.

use crate::{CacheInterface, InMemoryCacheService};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ManufacturerDraft, ProductDraft, ProductId};
use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use std::future::Future;
use std::time::Duration;

pub use catalog_repository::memory::{
    InMemoryComponentRepository, InMemoryManufacturerRepository, InMemoryProductRepository,
};

/// Cache whose every operation fails, as when Redis is unreachable.
pub struct FailingCache;

#[async_trait]
impl CacheInterface for FailingCache {
    async fn get_raw(&self, _key: &str) -> CatalogResult<Option<String>> {
        Err(CatalogError::cache("connection refused"))
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> CatalogResult<()> {
        Err(CatalogError::cache("connection refused"))
    }

    async fn delete(&self, _key: &str) -> CatalogResult<bool> {
        Err(CatalogError::cache("connection refused"))
    }

    async fn exists(&self, _key: &str) -> CatalogResult<bool> {
        Err(CatalogError::cache("connection refused"))
    }

    async fn ping(&self) -> CatalogResult<()> {
        Err(CatalogError::cache("connection refused"))
    }

    fn default_ttl(&self) -> Duration {
        Duration::from_secs(60)
    }
}

/// In-memory cache that rejects writes to a single key.
pub struct RejectWritesTo {
    inner: InMemoryCacheService,
    key: &'static str,
}

impl RejectWritesTo {
    pub fn new(key: &'static str) -> Self {
        Self {
            inner: InMemoryCacheService::new(),
            key,
        }
    }
}

#[async_trait]
impl CacheInterface for RejectWritesTo {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        self.inner.get_raw(key).await
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if key == self.key {
            return Err(CatalogError::cache("down"));
        }
        self.inner.set_raw(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> CatalogResult<bool> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> CatalogResult<bool> {
        self.inner.exists(key).await
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.inner.ping().await
    }

    fn default_ttl(&self) -> Duration {
        self.inner.default_ttl()
    }
}

/// Runs `future` on a current-thread runtime with a thread-local metrics
/// recorder installed, returning its output and the recorder's snapshotter.
pub fn with_recorded_metrics<F: Future>(future: F) -> (F::Output, Snapshotter) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let output = metrics::with_local_recorder(&recorder, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    });
    (output, snapshotter)
}

/// Sum of every counter recorded under `name`.
pub fn counter_value(snapshotter: &Snapshotter, name: &str) -> u64 {
    snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .filter(|(key, ..)| key.key().name() == name)
        .map(|(.., value)| match value {
            DebugValue::Counter(count) => count,
            _ => 0,
        })
        .sum()
}

pub fn product_draft(name: &str, price: f64) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        image_path: format!("/images/{}.png", name.to_lowercase()),
        components: None,
    }
}

pub fn manufacturer_draft(name: &str, products: Vec<ProductId>) -> ManufacturerDraft {
    ManufacturerDraft {
        name: name.to_string(),
        address: "1 Industrial Way".to_string(),
        contact_number: 5_551_234,
        profile_image_path: "/images/acme.png".to_string(),
        products: Some(products),
    }
}
