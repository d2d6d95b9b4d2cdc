//! # Catalog Service
//!
//! Business logic for products, manufacturers and components.
//!
//! Reads go through a cache-aside policy ([`cache::CacheAside`]): collections
//! and single entities are served from the cache when present and loaded
//! from the store on a miss. Writes go to the store first, then overwrite or
//! evict the affected cache entries and refresh the collection entry.

pub mod cache;
pub mod component_service;
pub mod dto;
pub mod r#impl;
pub mod manufacturer_service;
pub mod metrics;
pub mod product_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::*;
pub use component_service::*;
pub use dto::*;
pub use manufacturer_service::*;
pub use product_service::*;
pub use r#impl::{ComponentServiceComponent, ManufacturerServiceComponent, ProductServiceComponent};
