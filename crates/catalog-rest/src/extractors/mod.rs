//! Custom Axum extractors.

mod entity_id;
mod validated;

pub use entity_id::*;
pub use validated::*;
