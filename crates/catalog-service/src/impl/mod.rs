//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `product_service.rs`).

pub mod component_service_impl;
pub mod manufacturer_service_impl;
pub mod product_service_impl;

pub use component_service_impl::ComponentServiceComponent;
pub use manufacturer_service_impl::ManufacturerServiceComponent;
pub use product_service_impl::ProductServiceComponent;
