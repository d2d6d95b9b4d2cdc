//! MongoDB product repository implementation.

use super::documents::{by_id, ProductDocument};
use super::{distinct_object_ids, object_ids, store_error, to_bson, typed_id, PRODUCTS};
use crate::{MongoConnectionInterface, ProductRepository};
use async_trait::async_trait;
use catalog_core::{
    CatalogResult, EmbeddedComponent, EntityStore, Product, ProductDraft, ProductId,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ReturnDocument;
use mongodb::Collection;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// MongoDB product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct MongoProductRepository {
    #[shaku(inject)]
    connection: Arc<dyn MongoConnectionInterface>,
}

impl MongoProductRepository {
    /// Creates a new MongoDB product repository.
    #[must_use]
    pub fn new(connection: Arc<dyn MongoConnectionInterface>) -> Self {
        Self { connection }
    }

    fn collection(&self) -> CatalogResult<Collection<ProductDocument>> {
        Ok(self.connection.database()?.collection(PRODUCTS))
    }

    async fn collect(
        &self,
        filter: mongodb::bson::Document,
    ) -> CatalogResult<Vec<Product>> {
        let cursor = self
            .collection()?
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(store_error)?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await.map_err(store_error)?;
        documents.into_iter().map(ProductDocument::into_entity).collect()
    }
}

#[async_trait]
impl EntityStore for MongoProductRepository {
    type Item = Product;
    type Id = ProductId;
    type Draft = ProductDraft;

    async fn find_all(&self) -> CatalogResult<Vec<Product>> {
        debug!("Loading all products");
        self.collect(doc! {}).await
    }

    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>> {
        debug!("Finding product by id: {}", id);
        self.collection()?
            .find_one(by_id(id)?)
            .await
            .map_err(store_error)?
            .map(ProductDocument::into_entity)
            .transpose()
    }

    async fn create(&self, draft: ProductDraft) -> CatalogResult<Product> {
        let document = ProductDocument::new(draft);
        self.collection()?
            .insert_one(&document)
            .await
            .map_err(store_error)?;

        info!("Product created: {}", document.id);
        document.into_entity()
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        draft: ProductDraft,
    ) -> CatalogResult<Option<Product>> {
        debug!("Updating product: {}", id);
        self.collection()?
            .find_one_and_update(by_id(id)?, ProductDocument::update(&draft)?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_error)?
            .map(ProductDocument::into_entity)
            .transpose()
    }

    async fn delete_by_id(&self, id: &ProductId) -> CatalogResult<bool> {
        let result = self
            .collection()?
            .delete_one(by_id(id)?)
            .await
            .map_err(store_error)?;

        debug!("Deleted {} product(s) with id {}", result.deleted_count, id);
        Ok(result.deleted_count > 0)
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn push_component(
        &self,
        id: &ProductId,
        component: EmbeddedComponent,
    ) -> CatalogResult<Option<Product>> {
        debug!("Adding component '{}' to product {}", component.name, id);
        let update = doc! { "$push": { "components": to_bson(&component)? } };
        self.collection()?
            .find_one_and_update(by_id(id)?, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_error)?
            .map(ProductDocument::into_entity)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.collect(doc! { "_id": { "$in": object_ids(ids)? } }).await
    }

    async fn existing_ids(&self, ids: &[ProductId]) -> CatalogResult<Vec<ProductId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let values = self
            .collection()?
            .distinct("_id", doc! { "_id": { "$in": object_ids(ids)? } })
            .await
            .map_err(store_error)?;

        distinct_object_ids(values).into_iter().map(typed_id).collect()
    }
}
