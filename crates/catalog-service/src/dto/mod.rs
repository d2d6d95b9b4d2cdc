//! Data transfer objects for the service layer.

mod relation_dto;

pub use relation_dto::*;
