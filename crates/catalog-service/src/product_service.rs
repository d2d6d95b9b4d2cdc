//! Product service trait definition.

use crate::dto::{NewManufacturerRequest, ProductWithManufacturers};
use catalog_core::{
    CatalogResult, EmbeddedComponent, Interface, Manufacturer, Product, ProductDraft, ProductId,
};
use async_trait::async_trait;

/// Product service trait.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Lists all products.
    async fn list_products(&self) -> CatalogResult<Vec<Product>>;

    /// Gets a product by ID.
    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product>;

    /// Creates a new product.
    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product>;

    /// Replaces a product's fields.
    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<Product>;

    /// Deletes a product and removes it from every manufacturer's product list.
    async fn delete_product(&self, id: &ProductId) -> CatalogResult<()>;

    /// Appends an embedded component to a product.
    async fn add_component(
        &self,
        id: &ProductId,
        component: EmbeddedComponent,
    ) -> CatalogResult<Product>;

    /// Creates a manufacturer that references the product.
    async fn add_manufacturer(
        &self,
        id: &ProductId,
        request: NewManufacturerRequest,
    ) -> CatalogResult<Manufacturer>;

    /// Gets a product with the manufacturers referencing it.
    async fn get_product_manufacturers(
        &self,
        id: &ProductId,
    ) -> CatalogResult<ProductWithManufacturers>;
}
