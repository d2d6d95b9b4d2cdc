//! MongoDB repository implementations.

mod component_repository;
mod documents;
mod manufacturer_repository;
mod product_repository;

pub use component_repository::MongoComponentRepository;
pub use manufacturer_repository::MongoManufacturerRepository;
pub use product_repository::MongoProductRepository;

use catalog_core::{CatalogError, CatalogResult};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use tracing::warn;

/// Collection holding products.
pub const PRODUCTS: &str = "products";
/// Collection holding manufacturers.
pub const MANUFACTURERS: &str = "manufacturers";
/// Collection holding components.
pub const COMPONENTS: &str = "components";

/// Maps a driver error to a store failure.
pub(crate) fn store_error(err: mongodb::error::Error) -> CatalogError {
    warn!("MongoDB operation failed: {}", err);
    CatalogError::Store(err.to_string())
}

/// Converts a typed id into an `ObjectId`.
pub(crate) fn object_id(id: impl AsRef<str>) -> CatalogResult<ObjectId> {
    ObjectId::parse_str(id.as_ref())
        .map_err(|e| CatalogError::internal(format!("Invalid object id '{}': {}", id.as_ref(), e)))
}

/// Converts a slice of typed ids into `ObjectId`s.
pub(crate) fn object_ids<T: AsRef<str>>(ids: &[T]) -> CatalogResult<Vec<ObjectId>> {
    ids.iter().map(object_id).collect()
}

/// Converts a driver `ObjectId` back into a typed id.
pub(crate) fn typed_id<T>(oid: ObjectId) -> CatalogResult<T>
where
    T: TryFrom<String, Error = catalog_core::InvalidId>,
{
    T::try_from(oid.to_hex()).map_err(|e| CatalogError::internal(e.to_string()))
}

/// Extracts `ObjectId`s from the result of a `distinct("_id")` query.
pub(crate) fn distinct_object_ids(values: Vec<Bson>) -> Vec<ObjectId> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Bson::ObjectId(oid) => Some(oid),
            _ => None,
        })
        .collect()
}

fn to_bson<T: serde::Serialize>(value: &T) -> CatalogResult<Bson> {
    mongodb::bson::to_bson(value)
        .map_err(|e| CatalogError::Serialization(format!("BSON serialization error: {}", e)))
}
