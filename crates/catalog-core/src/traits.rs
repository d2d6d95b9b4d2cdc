//! Core traits shared by the store, service and presentation layers.

use crate::CatalogResult;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

/// Trait for entities with a unique identifier.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Identifier type of the entity.
    type Id: Display + Clone + Send + Sync + 'static;

    /// Human readable resource name used in errors and logs.
    const RESOURCE_TYPE: &'static str;

    /// Returns the entity's unique identifier.
    fn id(&self) -> &Self::Id;
}

/// Store operations every entity kind supports.
///
/// Implementations talk to the source of truth. Failures surface as
/// [`crate::CatalogError::Store`] and are never retried here.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Entity kind persisted by this store.
    type Item: Entity<Id = Self::Id>;
    /// Identifier of the entity kind.
    type Id: Display + Clone + Send + Sync + 'static;
    /// Field set accepted by create and replace-style update.
    type Draft: Send + Sync + 'static;

    /// Returns every stored entity.
    async fn find_all(&self) -> CatalogResult<Vec<Self::Item>>;

    /// Finds an entity by its ID.
    async fn find_by_id(&self, id: &Self::Id) -> CatalogResult<Option<Self::Item>>;

    /// Persists a new entity and returns it with its generated id.
    async fn create(&self, draft: Self::Draft) -> CatalogResult<Self::Item>;

    /// Replaces the fields of an entity, returning the updated value.
    async fn update_by_id(
        &self,
        id: &Self::Id,
        draft: Self::Draft,
    ) -> CatalogResult<Option<Self::Item>>;

    /// Deletes an entity, returning whether a record was removed.
    async fn delete_by_id(&self, id: &Self::Id) -> CatalogResult<bool>;
}

/// Trait for health checks.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Returns the name of this health check.
    fn name(&self) -> &str;

    /// Performs the health check.
    async fn check(&self) -> HealthStatus;
}

/// Health check status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// The component is healthy.
    Healthy,
    /// The component is unhealthy.
    Unhealthy(String),
}

impl HealthStatus {
    /// Returns true if the status is healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Unhealthy(reason) => Some(reason),
        }
    }
}
