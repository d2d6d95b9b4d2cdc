//! MongoDB manufacturer repository implementation.

use super::documents::{by_id, ManufacturerDocument};
use super::{distinct_object_ids, object_id, store_error, typed_id, MANUFACTURERS};
use crate::{ManufacturerRepository, MongoConnectionInterface};
use async_trait::async_trait;
use catalog_core::{
    CatalogResult, EntityStore, Manufacturer, ManufacturerDraft, ManufacturerId, ProductId,
};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// MongoDB manufacturer repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ManufacturerRepository)]
pub struct MongoManufacturerRepository {
    #[shaku(inject)]
    connection: Arc<dyn MongoConnectionInterface>,
}

impl MongoManufacturerRepository {
    /// Creates a new MongoDB manufacturer repository.
    #[must_use]
    pub fn new(connection: Arc<dyn MongoConnectionInterface>) -> Self {
        Self { connection }
    }

    fn collection(&self) -> CatalogResult<Collection<ManufacturerDocument>> {
        Ok(self.connection.database()?.collection(MANUFACTURERS))
    }

    async fn collect(&self, filter: Document) -> CatalogResult<Vec<Manufacturer>> {
        let cursor = self
            .collection()?
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(store_error)?;
        let documents: Vec<ManufacturerDocument> =
            cursor.try_collect().await.map_err(store_error)?;
        documents
            .into_iter()
            .map(ManufacturerDocument::into_entity)
            .collect()
    }
}

#[async_trait]
impl EntityStore for MongoManufacturerRepository {
    type Item = Manufacturer;
    type Id = ManufacturerId;
    type Draft = ManufacturerDraft;

    async fn find_all(&self) -> CatalogResult<Vec<Manufacturer>> {
        debug!("Loading all manufacturers");
        self.collect(doc! {}).await
    }

    async fn find_by_id(&self, id: &ManufacturerId) -> CatalogResult<Option<Manufacturer>> {
        debug!("Finding manufacturer by id: {}", id);
        self.collection()?
            .find_one(by_id(id)?)
            .await
            .map_err(store_error)?
            .map(ManufacturerDocument::into_entity)
            .transpose()
    }

    async fn create(&self, draft: ManufacturerDraft) -> CatalogResult<Manufacturer> {
        let document = ManufacturerDocument::new(draft)?;
        self.collection()?
            .insert_one(&document)
            .await
            .map_err(store_error)?;

        info!("Manufacturer created: {}", document.id);
        document.into_entity()
    }

    async fn update_by_id(
        &self,
        id: &ManufacturerId,
        draft: ManufacturerDraft,
    ) -> CatalogResult<Option<Manufacturer>> {
        debug!("Updating manufacturer: {}", id);
        self.collection()?
            .find_one_and_update(by_id(id)?, ManufacturerDocument::update(&draft)?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_error)?
            .map(ManufacturerDocument::into_entity)
            .transpose()
    }

    async fn delete_by_id(&self, id: &ManufacturerId) -> CatalogResult<bool> {
        let result = self
            .collection()?
            .delete_one(by_id(id)?)
            .await
            .map_err(store_error)?;

        debug!("Deleted {} manufacturer(s) with id {}", result.deleted_count, id);
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ManufacturerRepository for MongoManufacturerRepository {
    async fn pull_product_reference(
        &self,
        product_id: &ProductId,
    ) -> CatalogResult<Vec<ManufacturerId>> {
        let product = object_id(product_id)?;
        let filter = doc! { "products": product };
        let collection = self.collection()?;

        let affected = collection
            .distinct("_id", filter.clone())
            .await
            .map_err(store_error)?;
        if affected.is_empty() {
            return Ok(Vec::new());
        }

        let result = collection
            .update_many(filter, doc! { "$pull": { "products": product } })
            .await
            .map_err(store_error)?;

        info!(
            "Removed product {} from {} manufacturer(s)",
            product_id, result.modified_count
        );
        distinct_object_ids(affected)
            .into_iter()
            .map(typed_id)
            .collect()
    }

    async fn find_by_product(&self, product_id: &ProductId) -> CatalogResult<Vec<Manufacturer>> {
        self.collect(doc! { "products": object_id(product_id)? }).await
    }
}
