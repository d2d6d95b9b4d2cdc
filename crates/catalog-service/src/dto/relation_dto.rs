//! Request and response shapes for the product/manufacturer relation.

use catalog_core::{Manufacturer, ManufacturerDraft, Product, ProductId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Manufacturer fields accepted when creating a manufacturer for a product.
///
/// The product reference comes from the path, so `products` is not accepted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewManufacturerRequest {
    #[validate(length(min = 3, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 255))]
    pub address: String,

    #[validate(range(min = 5))]
    pub contact_number: i64,

    #[validate(length(min = 1, max = 255))]
    pub profile_image_path: String,
}

impl NewManufacturerRequest {
    /// Converts into a manufacturer draft referencing `product_id`.
    #[must_use]
    pub fn into_draft(self, product_id: ProductId) -> ManufacturerDraft {
        ManufacturerDraft {
            name: self.name,
            address: self.address,
            contact_number: self.contact_number,
            profile_image_path: self.profile_image_path,
            products: Some(vec![product_id]),
        }
    }
}

/// A product together with every manufacturer referencing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductWithManufacturers {
    pub product: Product,
    pub manufacturers: Vec<Manufacturer>,
}

/// A manufacturer with its product references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ManufacturerWithProducts {
    pub manufacturer: Manufacturer,
    pub products: Vec<Product>,
}
