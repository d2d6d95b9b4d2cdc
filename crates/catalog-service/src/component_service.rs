//! Component service trait definition.

use catalog_core::{CatalogResult, Component, ComponentDraft, ComponentId, Interface};
use async_trait::async_trait;

/// Component service trait.
#[async_trait]
pub trait ComponentService: Interface + Send + Sync {
    async fn list_components(&self) -> CatalogResult<Vec<Component>>;

    async fn get_component(&self, id: &ComponentId) -> CatalogResult<Component>;

    async fn create_component(&self, draft: ComponentDraft) -> CatalogResult<Component>;

    async fn update_component(
        &self,
        id: &ComponentId,
        draft: ComponentDraft,
    ) -> CatalogResult<Component>;

    async fn delete_component(&self, id: &ComponentId) -> CatalogResult<()>;
}
