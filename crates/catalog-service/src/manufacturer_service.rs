//! Manufacturer service trait definition.

use crate::dto::ManufacturerWithProducts;
use catalog_core::{CatalogResult, Interface, Manufacturer, ManufacturerDraft, ManufacturerId};
use async_trait::async_trait;

/// Manufacturer service trait.
#[async_trait]
pub trait ManufacturerService: Interface + Send + Sync {
    /// Lists all manufacturers.
    async fn list_manufacturers(&self) -> CatalogResult<Vec<Manufacturer>>;

    /// Gets a manufacturer by ID.
    async fn get_manufacturer(&self, id: &ManufacturerId) -> CatalogResult<Manufacturer>;

    /// Creates a manufacturer. Every referenced product must exist.
    async fn create_manufacturer(&self, draft: ManufacturerDraft) -> CatalogResult<Manufacturer>;

    /// Replaces a manufacturer's fields.
    async fn update_manufacturer(
        &self,
        id: &ManufacturerId,
        draft: ManufacturerDraft,
    ) -> CatalogResult<Manufacturer>;

    /// Deletes a manufacturer. Referenced products are left untouched.
    async fn delete_manufacturer(&self, id: &ManufacturerId) -> CatalogResult<()>;

    /// Gets a manufacturer with its product references resolved.
    async fn get_manufacturer_products(
        &self,
        id: &ManufacturerId,
    ) -> CatalogResult<ManufacturerWithProducts>;
}
