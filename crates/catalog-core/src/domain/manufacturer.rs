//! Manufacturer entity.

use crate::{Entity, ManufacturerId, ProductId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Manufacturer entity, the owning side of the manufacturer/product relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: String,
    pub address: String,
    pub contact_number: i64,
    pub profile_image_path: String,
    /// Ordered references to products.
    #[serde(default)]
    pub products: Vec<ProductId>,
}

impl Manufacturer {
    /// Builds a manufacturer from a draft and the id assigned by the store.
    #[must_use]
    pub fn from_draft(id: ManufacturerId, draft: ManufacturerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
            contact_number: draft.contact_number,
            profile_image_path: draft.profile_image_path,
            products: draft.products.unwrap_or_default(),
        }
    }

    /// Applies a replace-style update; product references are kept when the draft omits them.
    pub fn apply(&mut self, draft: ManufacturerDraft) {
        self.name = draft.name;
        self.address = draft.address;
        self.contact_number = draft.contact_number;
        self.profile_image_path = draft.profile_image_path;
        if let Some(products) = draft.products {
            self.products = products;
        }
    }

    /// Returns true if the manufacturer references the given product.
    #[must_use]
    pub fn references(&self, product_id: &ProductId) -> bool {
        self.products.contains(product_id)
    }
}

impl Entity for Manufacturer {
    type Id = ManufacturerId;

    const RESOURCE_TYPE: &'static str = "Manufacturer";

    fn id(&self) -> &ManufacturerId {
        &self.id
    }
}

/// Fields accepted when creating or replacing a manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ManufacturerDraft {
    #[validate(length(min = 3, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 255))]
    pub address: String,

    #[validate(range(min = 5))]
    pub contact_number: i64,

    #[validate(length(min = 1, max = 255))]
    pub profile_image_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductId>>,
}
