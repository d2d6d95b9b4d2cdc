//! MongoDB component repository implementation.

use super::documents::{by_id, ComponentDocument};
use super::{store_error, COMPONENTS};
use crate::{ComponentRepository, MongoConnectionInterface};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Component, ComponentDraft, ComponentId, EntityStore};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use std::sync::Arc;
use tracing::{debug, info};

/// MongoDB component repository implementation.
#[derive(shaku::Component, Clone)]
#[shaku(interface = ComponentRepository)]
pub struct MongoComponentRepository {
    #[shaku(inject)]
    connection: Arc<dyn MongoConnectionInterface>,
}

impl MongoComponentRepository {
    /// Creates a new MongoDB component repository.
    #[must_use]
    pub fn new(connection: Arc<dyn MongoConnectionInterface>) -> Self {
        Self { connection }
    }

    fn collection(&self) -> CatalogResult<Collection<ComponentDocument>> {
        Ok(self.connection.database()?.collection(COMPONENTS))
    }
}

#[async_trait]
impl EntityStore for MongoComponentRepository {
    type Item = Component;
    type Id = ComponentId;
    type Draft = ComponentDraft;

    async fn find_all(&self) -> CatalogResult<Vec<Component>> {
        debug!("Loading all components");
        let cursor = self
            .collection()?
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await
            .map_err(store_error)?;
        let documents: Vec<ComponentDocument> =
            cursor.try_collect().await.map_err(store_error)?;
        documents
            .into_iter()
            .map(ComponentDocument::into_entity)
            .collect()
    }

    async fn find_by_id(&self, id: &ComponentId) -> CatalogResult<Option<Component>> {
        debug!("Finding component by id: {}", id);
        self.collection()?
            .find_one(by_id(id)?)
            .await
            .map_err(store_error)?
            .map(ComponentDocument::into_entity)
            .transpose()
    }

    async fn create(&self, draft: ComponentDraft) -> CatalogResult<Component> {
        let document = ComponentDocument::new(draft);
        self.collection()?
            .insert_one(&document)
            .await
            .map_err(store_error)?;

        info!("Component created: {}", document.id);
        document.into_entity()
    }

    async fn update_by_id(
        &self,
        id: &ComponentId,
        draft: ComponentDraft,
    ) -> CatalogResult<Option<Component>> {
        self.collection()?
            .find_one_and_update(by_id(id)?, ComponentDocument::update(&draft))
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_error)?
            .map(ComponentDocument::into_entity)
            .transpose()
    }

    async fn delete_by_id(&self, id: &ComponentId) -> CatalogResult<bool> {
        let result = self
            .collection()?
            .delete_one(by_id(id)?)
            .await
            .map_err(store_error)?;
        Ok(result.deleted_count > 0)
    }
}

impl ComponentRepository for MongoComponentRepository {}
