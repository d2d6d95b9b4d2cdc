//! Repository trait definitions.

use catalog_core::{
    CatalogResult, Component, ComponentDraft, ComponentId, EmbeddedComponent, EntityStore,
    Interface, Manufacturer, ManufacturerDraft, ManufacturerId, Product, ProductDraft, ProductId,
};
use async_trait::async_trait;

/// Product repository trait.
#[async_trait]
pub trait ProductRepository:
    EntityStore<Item = Product, Id = ProductId, Draft = ProductDraft> + Interface
{
    /// Appends an embedded component to a product, returning the updated product.
    async fn push_component(
        &self,
        id: &ProductId,
        component: EmbeddedComponent,
    ) -> CatalogResult<Option<Product>>;

    /// Finds all products whose id is in `ids`.
    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>>;

    /// Returns the subset of `ids` that exist in the store.
    async fn existing_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<ProductId>>;
}

/// Manufacturer repository trait.
#[async_trait]
pub trait ManufacturerRepository:
    EntityStore<Item = Manufacturer, Id = ManufacturerId, Draft = ManufacturerDraft> + Interface
{
    /// Removes `product_id` from the `products` list of every manufacturer.
    ///
    /// Returns the ids of the manufacturers that referenced the product.
    async fn pull_product_reference(
        &self,
        product_id: &ProductId,
    ) -> CatalogResult<Vec<ManufacturerId>>;

    /// Finds every manufacturer referencing the product.
    async fn find_by_product(&self, product_id: &ProductId) -> CatalogResult<Vec<Manufacturer>>;
}

/// Component repository trait.
pub trait ComponentRepository:
    EntityStore<Item = Component, Id = ComponentId, Draft = ComponentDraft> + Interface
{
}
