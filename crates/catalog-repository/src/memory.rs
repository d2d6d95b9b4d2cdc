//! In-memory repositories for tests and local experiments.
//!
//! Records are kept in insertion order, which is also the order `find_all`
//! returns them in. Read calls are counted so callers can assert how often a
//! cache let a request through to the store, and a single failure can be
//! queued to simulate an unreachable database.

use crate::traits::{ComponentRepository, ManufacturerRepository, ProductRepository};
use catalog_core::{
    CatalogError, CatalogResult, Component, ComponentDraft, ComponentId, EmbeddedComponent,
    Entity, EntityStore, Manufacturer, ManufacturerDraft, ManufacturerId, Product, ProductDraft,
    ProductId,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Entities an [`InMemoryStore`] can build from a draft and update in place.
pub trait MemoryEntity: Entity {
    /// Draft type accepted by create and update.
    type Draft: Send + Sync + 'static;

    /// Parses a generated hex id into the entity's id type.
    fn parse_id(hex: &str) -> CatalogResult<Self::Id>;

    /// Builds a new entity.
    fn build(id: Self::Id, draft: Self::Draft) -> Self;

    /// Applies a replace-style update.
    fn apply_draft(&mut self, draft: Self::Draft);
}

impl MemoryEntity for Product {
    type Draft = ProductDraft;

    fn parse_id(hex: &str) -> CatalogResult<ProductId> {
        ProductId::parse(hex).map_err(|e| CatalogError::internal(e.to_string()))
    }

    fn build(id: ProductId, draft: ProductDraft) -> Self {
        Product::from_draft(id, draft)
    }

    fn apply_draft(&mut self, draft: ProductDraft) {
        self.apply(draft);
    }
}

impl MemoryEntity for Manufacturer {
    type Draft = ManufacturerDraft;

    fn parse_id(hex: &str) -> CatalogResult<ManufacturerId> {
        ManufacturerId::parse(hex).map_err(|e| CatalogError::internal(e.to_string()))
    }

    fn build(id: ManufacturerId, draft: ManufacturerDraft) -> Self {
        Manufacturer::from_draft(id, draft)
    }

    fn apply_draft(&mut self, draft: ManufacturerDraft) {
        self.apply(draft);
    }
}

impl MemoryEntity for Component {
    type Draft = ComponentDraft;

    fn parse_id(hex: &str) -> CatalogResult<ComponentId> {
        ComponentId::parse(hex).map_err(|e| CatalogError::internal(e.to_string()))
    }

    fn build(id: ComponentId, draft: ComponentDraft) -> Self {
        Component::from_draft(id, draft)
    }

    fn apply_draft(&mut self, draft: ComponentDraft) {
        self.name = draft.name;
        self.description = draft.description;
    }
}

/// Process-local store for one entity kind.
pub struct InMemoryStore<E> {
    items: Mutex<Vec<E>>,
    next_id: AtomicU64,
    find_all_calls: AtomicUsize,
    find_by_id_calls: AtomicUsize,
    failure: Mutex<Option<CatalogError>>,
}

/// In-memory product repository.
pub type InMemoryProductRepository = InMemoryStore<Product>;
/// In-memory manufacturer repository.
pub type InMemoryManufacturerRepository = InMemoryStore<Manufacturer>;
/// In-memory component repository.
pub type InMemoryComponentRepository = InMemoryStore<Component>;

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            find_all_calls: AtomicUsize::new(0),
            find_by_id_calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }
}

impl<E: MemoryEntity> InMemoryStore<E> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record without touching the call counters or queued failure.
    pub fn seed(&self, draft: E::Draft) -> CatalogResult<E> {
        let hex = format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let item = E::build(E::parse_id(&hex)?, draft);
        self.items.lock().push(item.clone());
        Ok(item)
    }

    /// Removes a record directly.
    pub fn remove(&self, id: &E::Id) {
        let key = id.to_string();
        self.items.lock().retain(|e| e.id().to_string() != key);
    }

    /// Returns a copy of the stored records.
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.items.lock().clone()
    }

    /// Makes the next store call fail with `error`.
    pub fn fail_next(&self, error: CatalogError) {
        *self.failure.lock() = Some(error);
    }

    /// Number of `find_all` calls so far.
    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_by_id` calls so far.
    #[must_use]
    pub fn find_by_id_calls(&self) -> usize {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> CatalogResult<()> {
        match self.failure.lock().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: MemoryEntity> EntityStore for InMemoryStore<E> {
    type Item = E;
    type Id = E::Id;
    type Draft = <E as MemoryEntity>::Draft;

    async fn find_all(&self) -> CatalogResult<Vec<E>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: &E::Id) -> CatalogResult<Option<E>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let key = id.to_string();
        Ok(self
            .items
            .lock()
            .iter()
            .find(|e| e.id().to_string() == key)
            .cloned())
    }

    async fn create(&self, draft: Self::Draft) -> CatalogResult<E> {
        self.check()?;
        self.seed(draft)
    }

    async fn update_by_id(&self, id: &E::Id, draft: Self::Draft) -> CatalogResult<Option<E>> {
        self.check()?;
        let key = id.to_string();
        let mut items = self.items.lock();
        Ok(items
            .iter_mut()
            .find(|e| e.id().to_string() == key)
            .map(|e| {
                e.apply_draft(draft);
                e.clone()
            }))
    }

    async fn delete_by_id(&self, id: &E::Id) -> CatalogResult<bool> {
        self.check()?;
        let key = id.to_string();
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|e| e.id().to_string() != key);
        Ok(items.len() < before)
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore<Product> {
    async fn push_component(
        &self,
        id: &ProductId,
        component: EmbeddedComponent,
    ) -> CatalogResult<Option<Product>> {
        self.check()?;
        Ok(self.items.lock().iter_mut().find(|p| &p.id == id).map(|p| {
            p.components.push(component);
            p.clone()
        }))
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        self.check()?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }

    async fn existing_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<ProductId>> {
        Ok(self
            .find_by_ids(ids)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect())
    }
}

#[async_trait]
impl ManufacturerRepository for InMemoryStore<Manufacturer> {
    async fn pull_product_reference(
        &self,
        product_id: &ProductId,
    ) -> CatalogResult<Vec<ManufacturerId>> {
        self.check()?;
        let mut affected = Vec::new();
        for manufacturer in self
            .items
            .lock()
            .iter_mut()
            .filter(|m| m.references(product_id))
        {
            manufacturer.products.retain(|p| p != product_id);
            affected.push(manufacturer.id.clone());
        }
        Ok(affected)
    }

    async fn find_by_product(&self, product_id: &ProductId) -> CatalogResult<Vec<Manufacturer>> {
        self.check()?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|m| m.references(product_id))
            .collect())
    }
}

impl ComponentRepository for InMemoryStore<Component> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductDraft {
        ProductDraft {
            name: "Widget".to_string(),
            description: "A small widget".to_string(),
            price: 9.99,
            image_path: "/img/w.png".to_string(),
            components: None,
        }
    }

    fn acme(products: Vec<ProductId>) -> ManufacturerDraft {
        ManufacturerDraft {
            name: "Acme".to_string(),
            address: "1 Road Runner Way".to_string(),
            contact_number: 5_551_234,
            profile_image_path: "/img/acme.png".to_string(),
            products: Some(products),
        }
    }

    #[tokio::test]
    async fn test_generated_ids_are_object_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.create(widget()).await.unwrap();
        let second = repo.create(widget()).await.unwrap();

        assert_eq!(first.id.as_str(), "000000000000000000000001");
        assert_ne!(first.id, second.id);
        assert_eq!(repo.find_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_pull_product_reference() {
        let products = InMemoryProductRepository::new();
        let p1 = products.seed(widget()).unwrap();
        let p2 = products.seed(widget()).unwrap();

        let manufacturers = InMemoryManufacturerRepository::new();
        let m1 = manufacturers.seed(acme(vec![p1.id.clone(), p2.id.clone()])).unwrap();
        manufacturers.seed(acme(vec![p2.id.clone()])).unwrap();

        let affected = manufacturers.pull_product_reference(&p1.id).await.unwrap();

        assert_eq!(affected, vec![m1.id.clone()]);
        let m1 = manufacturers.find_by_id(&m1.id).await.unwrap().unwrap();
        assert_eq!(m1.products, vec![p2.id.clone()]);
        assert_eq!(manufacturers.find_by_product(&p2.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_queued_failure_fires_once() {
        let repo = InMemoryComponentRepository::new();
        repo.fail_next(CatalogError::store("connection refused"));

        assert!(matches!(repo.find_all().await, Err(CatalogError::Store(_))));
        assert!(repo.find_all().await.unwrap().is_empty());
        assert_eq!(repo.find_all_calls(), 2);
    }
}
