//! Product service implementation.

use crate::cache::{CacheAside, CacheInterface};
use crate::dto::{NewManufacturerRequest, ProductWithManufacturers};
use crate::metrics::CascadeMetrics;
use crate::product_service::ProductService;
use catalog_core::{
    CatalogError, CatalogResult, EmbeddedComponent, Entity, EntityStore, Manufacturer,
    ManufacturerId, Product, ProductDraft, ProductId, ValidateExt,
};
use catalog_repository::{ManufacturerRepository, ProductRepository};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Product service component for DI.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceComponent {
    #[shaku(inject)]
    product_repository: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    manufacturer_repository: Arc<dyn ManufacturerRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ProductServiceComponent {
    /// Creates a new product service.
    pub fn new(
        product_repository: Arc<dyn ProductRepository>,
        manufacturer_repository: Arc<dyn ManufacturerRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            product_repository,
            manufacturer_repository,
            cache,
        }
    }

    fn products(&self) -> CacheAside<dyn ProductRepository> {
        CacheAside::new(self.product_repository.clone(), self.cache.clone())
    }

    fn manufacturers(&self) -> CacheAside<dyn ManufacturerRepository> {
        CacheAside::new(self.manufacturer_repository.clone(), self.cache.clone())
    }

    /// Manufacturer cache invalidation followed by the product store delete.
    ///
    /// A failure here leaves the references pulled while the product record
    /// may still exist.
    async fn delete_after_cascade(
        &self,
        id: &ProductId,
        affected: &[ManufacturerId],
    ) -> CatalogResult<bool> {
        if !affected.is_empty() {
            let manufacturers = self.manufacturers();
            for manufacturer_id in affected {
                manufacturers.evict_entity(manufacturer_id).await?;
            }
            manufacturers.refresh_collection().await?;
        }

        self.product_repository.delete_by_id(id).await
    }

    /// Product cache invalidation once the store delete has returned.
    async fn invalidate_deleted(&self, id: &ProductId, removed: bool) -> CatalogResult<()> {
        let products = self.products();
        products.evict_entity(id).await?;
        if removed {
            products.refresh_collection().await?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductService for ProductServiceComponent {
    async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        debug!("Listing products");
        self.products().get_collection().await
    }

    async fn get_product(&self, id: &ProductId) -> CatalogResult<Product> {
        debug!("Getting product: {}", id);

        self.products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Product::RESOURCE_TYPE, id))
    }

    async fn create_product(&self, draft: ProductDraft) -> CatalogResult<Product> {
        debug!("Creating product: {}", draft.name);

        draft.validate_request()?;

        let product = self.products().create(draft).await?;

        info!("Product created: {}", product.id);
        Ok(product)
    }

    async fn update_product(&self, id: &ProductId, draft: ProductDraft) -> CatalogResult<Product> {
        debug!("Updating product: {}", id);

        draft.validate_request()?;

        let product = self
            .products()
            .update(id, draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(Product::RESOURCE_TYPE, id))?;

        info!("Product updated: {}", id);
        Ok(product)
    }

    async fn delete_product(&self, id: &ProductId) -> CatalogResult<()> {
        debug!("Deleting product: {}", id);

        let affected = self.manufacturer_repository.pull_product_reference(id).await?;
        if !affected.is_empty() {
            CascadeMetrics::references_pulled(affected.len());
            debug!(
                "Removed product {} from {} manufacturer(s)",
                id,
                affected.len()
            );
        }

        let removed = match self.delete_after_cascade(id, &affected).await {
            Ok(removed) => removed,
            Err(e) => {
                if !affected.is_empty() {
                    CascadeMetrics::partial_failure();
                    warn!(
                        product_id = %id,
                        manufacturers = affected.len(),
                        error = %e,
                        "Product references were removed but the product delete failed"
                    );
                }
                return Err(e);
            }
        };

        self.invalidate_deleted(id, removed).await?;

        if !removed {
            return Err(CatalogError::not_found(Product::RESOURCE_TYPE, id));
        }

        info!("Product deleted: {}", id);
        Ok(())
    }

    async fn add_component(
        &self,
        id: &ProductId,
        component: EmbeddedComponent,
    ) -> CatalogResult<Product> {
        debug!("Adding component '{}' to product: {}", component.name, id);

        component.validate_request()?;

        let product = self
            .product_repository
            .push_component(id, component)
            .await?
            .ok_or_else(|| CatalogError::not_found(Product::RESOURCE_TYPE, id))?;

        let products = self.products();
        products.put_entity(&product).await?;
        products.refresh_collection().await?;

        info!("Component added to product: {}", id);
        Ok(product)
    }

    async fn add_manufacturer(
        &self,
        id: &ProductId,
        request: NewManufacturerRequest,
    ) -> CatalogResult<Manufacturer> {
        debug!("Adding manufacturer '{}' to product: {}", request.name, id);

        request.validate_request()?;

        self.get_product(id).await?;

        let manufacturer = self.manufacturers().create(request.into_draft(id.clone())).await?;

        info!("Manufacturer {} created for product {}", manufacturer.id, id);
        Ok(manufacturer)
    }

    async fn get_product_manufacturers(
        &self,
        id: &ProductId,
    ) -> CatalogResult<ProductWithManufacturers> {
        debug!("Getting manufacturers of product: {}", id);

        let product = self.get_product(id).await?;
        let manufacturers = self.manufacturer_repository.find_by_product(id).await?;

        Ok(ProductWithManufacturers {
            product,
            manufacturers,
        })
    }
}

impl std::fmt::Debug for ProductServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::names;
    use crate::test_support::{
        counter_value, manufacturer_draft, product_draft, with_recorded_metrics, FailingCache,
        InMemoryManufacturerRepository, InMemoryProductRepository, RejectWritesTo,
    };
    use crate::{CacheExt, InMemoryCacheService};
    use std::time::Duration;

    struct Fixture {
        service: ProductServiceComponent,
        products: Arc<InMemoryProductRepository>,
        manufacturers: Arc<InMemoryManufacturerRepository>,
        cache: Arc<InMemoryCacheService>,
    }

    fn fixture() -> Fixture {
        let products = Arc::new(InMemoryProductRepository::default());
        let manufacturers = Arc::new(InMemoryManufacturerRepository::default());
        let cache = Arc::new(InMemoryCacheService::with_ttl(Duration::from_secs(5000)));
        let service =
            ProductServiceComponent::new(products.clone(), manufacturers.clone(), cache.clone());
        Fixture {
            service,
            products,
            manufacturers,
            cache,
        }
    }

    fn gear() -> EmbeddedComponent {
        EmbeddedComponent {
            name: "Gear".to_string(),
            description: "Steel gear".to_string(),
        }
    }

    #[tokio::test]
    async fn test_widget_lifecycle() {
        let f = fixture();

        let widget = f.service.create_product(product_draft("Widget", 9.99)).await.unwrap();
        assert_eq!(f.service.list_products().await.unwrap(), vec![widget.clone()]);
        assert_eq!(f.service.get_product(&widget.id).await.unwrap(), widget);

        let updated = f
            .service
            .update_product(&widget.id, product_draft("Widget Pro", 19.99))
            .await
            .unwrap();
        assert_eq!(updated.price, 19.99);
        assert_eq!(f.service.get_product(&widget.id).await.unwrap(), updated);
        assert_eq!(f.service.list_products().await.unwrap(), vec![updated]);

        f.service.delete_product(&widget.id).await.unwrap();
        let err = f.service.get_product(&widget.id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { resource_type: "Product", .. }));
        assert!(f.service.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_served_from_cache() {
        let f = fixture();
        f.products.seed(product_draft("Widget", 9.99)).unwrap();

        f.service.list_products().await.unwrap();
        f.service.list_products().await.unwrap();

        assert_eq!(f.products.find_all_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_product_expires_after_ttl() {
        let f = fixture();
        let widget = f.products.seed(product_draft("Widget", 9.99)).unwrap();

        f.service.get_product(&widget.id).await.unwrap();
        tokio::time::advance(Duration::from_secs(4999)).await;
        f.service.get_product(&widget.id).await.unwrap();
        assert_eq!(f.products.find_by_id_calls(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        f.service.get_product(&widget.id).await.unwrap();
        assert_eq!(f.products.find_by_id_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected_before_store() {
        let f = fixture();

        let err = f
            .service
            .create_product(product_draft("Widget", 1.005))
            .await
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation { .. }));
        assert!(f.products.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let f = fixture();
        let id = ProductId::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();

        let err = f
            .service
            .update_product(&id, product_draft("Widget", 9.99))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let f = fixture();
        let id = ProductId::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();

        let err = f.service.delete_product(&id).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_manufacturers() {
        let f = fixture();
        let widget = f.products.seed(product_draft("Widget", 9.99)).unwrap();
        let gadget = f.products.seed(product_draft("Gadget", 4.5)).unwrap();
        let acme = f
            .manufacturers
            .seed(manufacturer_draft("Acme", vec![widget.id.clone(), gadget.id.clone()]))
            .unwrap();
        let globex = f
            .manufacturers
            .seed(manufacturer_draft("Globex", vec![gadget.id.clone()]))
            .unwrap();

        // warm the manufacturer keys so stale references would be visible
        f.cache
            .set(&format!("manufacturer{}", acme.id), &acme, Duration::from_secs(60))
            .await
            .unwrap();
        f.cache
            .set("manufacturers", &vec![acme.clone(), globex.clone()], Duration::from_secs(60))
            .await
            .unwrap();

        f.service.delete_product(&widget.id).await.unwrap();

        let stored = f.manufacturers.snapshot();
        assert_eq!(stored[0].products, vec![gadget.id.clone()]);
        assert_eq!(stored[1].products, vec![gadget.id.clone()]);
        assert!(!f.cache.exists(&format!("manufacturer{}", acme.id)).await.unwrap());

        let cached: Vec<Manufacturer> = f.cache.get("manufacturers").await.unwrap().unwrap();
        assert!(cached.iter().all(|m| !m.references(&widget.id)));
    }

    #[test]
    fn test_partial_cascade_propagates_store_error() {
        let f = fixture();
        let widget = f.products.seed(product_draft("Widget", 9.99)).unwrap();
        f.manufacturers
            .seed(manufacturer_draft("Acme", vec![widget.id.clone()]))
            .unwrap();
        f.products.fail_next(CatalogError::store("connection reset"));

        let (result, metrics) = with_recorded_metrics(f.service.delete_product(&widget.id));

        assert!(matches!(result, Err(CatalogError::Store(_))));
        // references are gone but the product remains
        assert!(f.manufacturers.snapshot()[0].products.is_empty());
        assert_eq!(f.products.snapshot(), vec![widget]);
        assert_eq!(counter_value(&metrics, names::PARTIAL_CASCADE_FAILURES_TOTAL), 1);
    }

    #[test]
    fn test_collection_refresh_failure_after_delete_is_not_partial_cascade() {
        let products = Arc::new(InMemoryProductRepository::default());
        let manufacturers = Arc::new(InMemoryManufacturerRepository::default());
        let service = ProductServiceComponent::new(
            products.clone(),
            manufacturers.clone(),
            Arc::new(RejectWritesTo::new("products")),
        );
        let widget = products.seed(product_draft("Widget", 9.99)).unwrap();
        manufacturers
            .seed(manufacturer_draft("Acme", vec![widget.id.clone()]))
            .unwrap();

        let (result, metrics) = with_recorded_metrics(service.delete_product(&widget.id));

        assert!(matches!(result, Err(CatalogError::Cache(_))));
        assert!(products.snapshot().is_empty());
        assert!(manufacturers.snapshot()[0].products.is_empty());
        assert_eq!(counter_value(&metrics, names::CASCADE_PULLS_TOTAL), 1);
        assert_eq!(counter_value(&metrics, names::PARTIAL_CASCADE_FAILURES_TOTAL), 0);
    }

    #[tokio::test]
    async fn test_add_component_updates_cached_product() {
        let f = fixture();
        let widget = f.products.seed(product_draft("Widget", 9.99)).unwrap();
        f.service.get_product(&widget.id).await.unwrap();

        let updated = f.service.add_component(&widget.id, gear()).await.unwrap();

        assert_eq!(updated.components, vec![gear()]);
        assert_eq!(f.service.get_product(&widget.id).await.unwrap(), updated);
        assert_eq!(f.service.list_products().await.unwrap(), vec![updated]);
        assert_eq!(f.products.find_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn test_add_component_to_missing_product() {
        let f = fixture();
        let id = ProductId::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();

        let err = f.service.add_component(&id, gear()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_manufacturer_references_product() {
        let f = fixture();
        let widget = f.products.seed(product_draft("Widget", 9.99)).unwrap();
        let request = NewManufacturerRequest {
            name: "Acme".to_string(),
            address: "1 Road Runner Way".to_string(),
            contact_number: 5_551_234,
            profile_image_path: "/img/acme.png".to_string(),
        };

        let acme = f.service.add_manufacturer(&widget.id, request).await.unwrap();
        assert_eq!(acme.products, vec![widget.id.clone()]);

        let view = f.service.get_product_manufacturers(&widget.id).await.unwrap();
        assert_eq!(view.product, widget);
        assert_eq!(view.manufacturers, vec![acme.clone()]);

        let cached: Vec<Manufacturer> = f.cache.get("manufacturers").await.unwrap().unwrap();
        assert_eq!(cached, vec![acme]);
    }

    #[tokio::test]
    async fn test_cache_failure_propagates() {
        let products = Arc::new(InMemoryProductRepository::default());
        let service = ProductServiceComponent::new(
            products.clone(),
            Arc::new(InMemoryManufacturerRepository::default()),
            Arc::new(FailingCache),
        );

        let err = service.list_products().await.unwrap_err();

        assert!(matches!(err, CatalogError::Cache(_)));
        assert_eq!(err.status_code(), 503);
        assert_eq!(products.find_all_calls(), 0);
    }
}
