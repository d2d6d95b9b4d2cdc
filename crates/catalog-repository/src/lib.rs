//! # Catalog Repository
//!
//! Store layer for products, manufacturers and components.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>       (store interface)
//! MongoProductRepository                (MongoDB implementation)
//!   ↓  Arc<dyn MongoConnectionInterface>
//! MongoDB
//! ```
//!
//! Every repository implements [`catalog_core::EntityStore`] for the common
//! CRUD surface plus the entity-specific operations declared in [`traits`].
//! The `memory` feature adds process-local implementations for tests.

pub mod connection;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod mongo;
pub mod traits;

pub use connection::*;
pub use mongo::*;
pub use traits::*;
