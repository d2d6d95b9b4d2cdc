//! Component service implementation.

use crate::cache::{CacheAside, CacheInterface};
use crate::component_service::ComponentService;
use catalog_core::{
    CatalogError, CatalogResult, Component, ComponentDraft, ComponentId, Entity, ValidateExt,
};
use catalog_repository::ComponentRepository;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Component service component for DI.
#[derive(shaku::Component)]
#[shaku(interface = ComponentService)]
pub struct ComponentServiceComponent {
    #[shaku(inject)]
    component_repository: Arc<dyn ComponentRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ComponentServiceComponent {
    /// Creates a new component service.
    pub fn new(
        component_repository: Arc<dyn ComponentRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            component_repository,
            cache,
        }
    }

    fn components(&self) -> CacheAside<dyn ComponentRepository> {
        CacheAside::new(self.component_repository.clone(), self.cache.clone())
    }
}

#[async_trait]
impl ComponentService for ComponentServiceComponent {
    async fn list_components(&self) -> CatalogResult<Vec<Component>> {
        self.components().get_collection().await
    }

    async fn get_component(&self, id: &ComponentId) -> CatalogResult<Component> {
        self.components()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(Component::RESOURCE_TYPE, id))
    }

    async fn create_component(&self, draft: ComponentDraft) -> CatalogResult<Component> {
        draft.validate_request()?;

        let component = self.components().create(draft).await?;
        info!("Component created: {}", component.id);
        Ok(component)
    }

    async fn update_component(
        &self,
        id: &ComponentId,
        draft: ComponentDraft,
    ) -> CatalogResult<Component> {
        draft.validate_request()?;

        self.components()
            .update(id, draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(Component::RESOURCE_TYPE, id))
    }

    async fn delete_component(&self, id: &ComponentId) -> CatalogResult<()> {
        debug!("Deleting component: {}", id);

        if self.components().delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::not_found(Component::RESOURCE_TYPE, id))
        }
    }
}

impl std::fmt::Debug for ComponentServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::InMemoryComponentRepository;
    use crate::InMemoryCacheService;

    fn service() -> (ComponentServiceComponent, Arc<InMemoryComponentRepository>) {
        let store = Arc::new(InMemoryComponentRepository::default());
        let service =
            ComponentServiceComponent::new(store.clone(), Arc::new(InMemoryCacheService::new()));
        (service, store)
    }

    fn draft(name: &str) -> ComponentDraft {
        ComponentDraft {
            name: name.to_string(),
            description: "Hardened steel".to_string(),
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (service, _) = service();

        let created = service.create_component(draft("Gear")).await.unwrap();
        let fetched = service.get_component(&created.id).await.unwrap();
        assert_eq!(fetched, created);

        let updated = service.update_component(&created.id, draft("Cog")).await.unwrap();
        assert_eq!(updated.name, "Cog");
        assert_eq!(service.list_components().await.unwrap(), vec![updated]);

        service.delete_component(&created.id).await.unwrap();
        assert!(service.list_components().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_short_name_is_rejected() {
        let (service, store) = service();

        let err = service.create_component(draft("ab")).await.unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_missing_component() {
        let (service, _) = service();
        let id = ComponentId::parse("64b7f0c2a1d3e4f5a6b7c8d9").unwrap();

        assert_eq!(service.get_component(&id).await.unwrap_err().status_code(), 404);
        assert_eq!(
            service
                .update_component(&id, draft("Gear"))
                .await
                .unwrap_err()
                .status_code(),
            404
        );
        assert_eq!(service.delete_component(&id).await.unwrap_err().status_code(), 404);
    }
}
