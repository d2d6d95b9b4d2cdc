//! Product entity.

use crate::validation::rules;
use crate::{Entity, ProductId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity with its embedded, denormalized components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_path: String,
    #[serde(default)]
    pub components: Vec<EmbeddedComponent>,
}

impl Product {
    /// Builds a product from a draft and the id assigned by the store.
    #[must_use]
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_path: draft.image_path,
            components: draft.components.unwrap_or_default(),
        }
    }

    /// Applies a replace-style update; components are kept when the draft omits them.
    pub fn apply(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.image_path = draft.image_path;
        if let Some(components) = draft.components {
            self.components = components;
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    const RESOURCE_TYPE: &'static str = "Product";

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// A component copied into a product, not a reference to a component record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmbeddedComponent {
    #[validate(length(min = 3, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 255))]
    pub description: String,
}

/// Fields accepted when creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductDraft {
    #[validate(length(min = 3, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 255))]
    pub description: String,

    #[validate(range(min = 1.0), custom(function = "rules::two_decimal_places"))]
    pub price: f64,

    #[validate(length(min = 1, max = 255))]
    pub image_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub components: Option<Vec<EmbeddedComponent>>,
}
