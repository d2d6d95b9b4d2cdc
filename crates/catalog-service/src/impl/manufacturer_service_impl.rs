//! Manufacturer service implementation.

use crate::cache::{CacheAside, CacheInterface};
use crate::dto::ManufacturerWithProducts;
use crate::manufacturer_service::ManufacturerService;
use catalog_core::{
    CatalogError, CatalogResult, Entity, Manufacturer, ManufacturerDraft, ManufacturerId,
    ProductId, ValidateExt,
};
use catalog_repository::{ManufacturerRepository, ProductRepository};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Manufacturer service component for DI.
#[derive(Component)]
#[shaku(interface = ManufacturerService)]
pub struct ManufacturerServiceComponent {
    #[shaku(inject)]
    manufacturer_repository: Arc<dyn ManufacturerRepository>,
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ManufacturerServiceComponent {
    /// Creates a new manufacturer service.
    pub fn new(
        manufacturer_repository: Arc<dyn ManufacturerRepository>,
        product_repository: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            manufacturer_repository,
            product_repository,
            cache,
        }
    }

    fn manufacturers(&self) -> CacheAside<dyn ManufacturerRepository> {
        CacheAside::new(self.manufacturer_repository.clone(), self.cache.clone())
    }

    /// Rejects drafts referencing products that do not exist.
    async fn ensure_products_exist(&self, draft: &ManufacturerDraft) -> CatalogResult<()> {
        let Some(products) = draft.products.as_deref() else {
            return Ok(());
        };
        if products.is_empty() {
            return Ok(());
        }

        let existing = self.product_repository.existing_ids(products).await?;
        let missing: Vec<&str> = products
            .iter()
            .filter(|id| !existing.contains(id))
            .map(ProductId::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::invalid_field(
                "products",
                "unknown_product",
                format!("unknown product id(s): {}", missing.join(", ")),
            ))
        }
    }
}

#[async_trait]
impl ManufacturerService for ManufacturerServiceComponent {
    async fn list_manufacturers(&self) -> CatalogResult<Vec<Manufacturer>> {
        debug!("Listing manufacturers");
        self.manufacturers().get_collection().await
    }

    async fn get_manufacturer(&self, id: &ManufacturerId) -> CatalogResult<Manufacturer> {
        debug!("Getting manufacturer: {}", id);

        self.manufacturers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Manufacturer::RESOURCE_TYPE, id))
    }

    async fn create_manufacturer(&self, draft: ManufacturerDraft) -> CatalogResult<Manufacturer> {
        debug!("Creating manufacturer: {}", draft.name);

        draft.validate_request()?;
        self.ensure_products_exist(&draft).await?;

        let manufacturer = self.manufacturers().create(draft).await?;

        info!("Manufacturer created: {}", manufacturer.id);
        Ok(manufacturer)
    }

    async fn update_manufacturer(
        &self,
        id: &ManufacturerId,
        draft: ManufacturerDraft,
    ) -> CatalogResult<Manufacturer> {
        debug!("Updating manufacturer: {}", id);

        draft.validate_request()?;
        self.ensure_products_exist(&draft).await?;

        let manufacturer = self
            .manufacturers()
            .update(id, draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(Manufacturer::RESOURCE_TYPE, id))?;

        info!("Manufacturer updated: {}", id);
        Ok(manufacturer)
    }

    async fn delete_manufacturer(&self, id: &ManufacturerId) -> CatalogResult<()> {
        debug!("Deleting manufacturer: {}", id);

        if !self.manufacturers().delete(id).await? {
            return Err(CatalogError::not_found(Manufacturer::RESOURCE_TYPE, id));
        }

        info!("Manufacturer deleted: {}", id);
        Ok(())
    }

    async fn get_manufacturer_products(
        &self,
        id: &ManufacturerId,
    ) -> CatalogResult<ManufacturerWithProducts> {
        debug!("Getting products of manufacturer: {}", id);

        let manufacturer = self.get_manufacturer(id).await?;
        let mut products = self
            .product_repository
            .find_by_ids(&manufacturer.products)
            .await?;

        // keep the manufacturer's reference order
        products.sort_by_key(|p| {
            manufacturer
                .products
                .iter()
                .position(|id| id == &p.id)
                .unwrap_or(usize::MAX)
        });

        Ok(ManufacturerWithProducts {
            manufacturer,
            products,
        })
    }
}

impl std::fmt::Debug for ManufacturerServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManufacturerServiceComponent").finish_non_exhaustive()
    }
}
