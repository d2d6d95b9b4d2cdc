//! Cache key naming for catalog entities.
//!
//! Each entity type owns two kinds of keys: one collection key holding the
//! full list (`products`), and one key per record built from the singular
//! name followed directly by the record id (`product64b7...`).

use catalog_core::{Component, Entity, Manufacturer, Product};

/// Key naming for a cacheable entity type.
pub trait CacheKeys: Entity {
    /// Key holding the serialized list of all records.
    const COLLECTION_KEY: &'static str;
    /// Prefix of the per-record key.
    const ENTITY_KEY_PREFIX: &'static str;

    /// Returns the per-record key for `id`.
    #[must_use]
    fn entity_key(id: &Self::Id) -> String {
        format!("{}{}", Self::ENTITY_KEY_PREFIX, id)
    }
}

impl CacheKeys for Product {
    const COLLECTION_KEY: &'static str = "products";
    const ENTITY_KEY_PREFIX: &'static str = "product";
}

impl CacheKeys for Manufacturer {
    const COLLECTION_KEY: &'static str = "manufacturers";
    const ENTITY_KEY_PREFIX: &'static str = "manufacturer";
}

impl CacheKeys for Component {
    const COLLECTION_KEY: &'static str = "components";
    const ENTITY_KEY_PREFIX: &'static str = "component";
}
