//! Catalog entities and the drafts used to create or replace them.

pub mod component;
pub mod manufacturer;
pub mod product;

pub use component::*;
pub use manufacturer::*;
pub use product::*;
