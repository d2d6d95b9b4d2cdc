//! Path extractor for entity identifiers.

use crate::responses::AppError;
use catalog_core::{CatalogError, Entity};
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::marker::PhantomData;
use std::str::FromStr;

/// Extracts the `:id` path segment as the id type of entity `E`.
///
/// An id that is not a valid ObjectId cannot name a stored record, so it is
/// answered with 404 before any handler runs.
pub struct EntityId<E: Entity>(pub E::Id, pub PhantomData<E>);

impl<E: Entity> EntityId<E> {
    /// Returns the parsed id.
    pub fn into_inner(self) -> E::Id {
        self.0
    }
}

#[async_trait]
impl<E, S> FromRequestParts<S> for EntityId<E>
where
    E: Entity,
    E::Id: FromStr,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError(CatalogError::not_found(E::RESOURCE_TYPE, e.body_text())))?;

        raw.parse::<E::Id>()
            .map(|id| EntityId(id, PhantomData))
            .map_err(|_| AppError(CatalogError::not_found(E::RESOURCE_TYPE, raw)))
    }
}
