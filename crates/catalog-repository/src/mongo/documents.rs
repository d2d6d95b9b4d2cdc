//! BSON document shapes stored in the catalog collections.

use super::{object_id, object_ids, to_bson, typed_id};
use catalog_core::{
    CatalogResult, Component, ComponentDraft, EmbeddedComponent, Manufacturer, ManufacturerDraft,
    Product, ProductDraft,
};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_path: String,
    #[serde(default)]
    pub components: Vec<EmbeddedComponent>,
}

impl ProductDocument {
    pub fn new(draft: ProductDraft) -> Self {
        Self {
            id: ObjectId::new(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_path: draft.image_path,
            components: draft.components.unwrap_or_default(),
        }
    }

    /// `$set` body for a replace-style update.
    pub fn update(draft: &ProductDraft) -> CatalogResult<Document> {
        let mut set = doc! {
            "name": draft.name.as_str(),
            "description": draft.description.as_str(),
            "price": draft.price,
            "imagePath": draft.image_path.as_str(),
        };
        if let Some(components) = &draft.components {
            set.insert("components", to_bson(components)?);
        }
        Ok(doc! { "$set": set })
    }

    pub fn into_entity(self) -> CatalogResult<Product> {
        Ok(Product {
            id: typed_id(self.id)?,
            name: self.name,
            description: self.description,
            price: self.price,
            image_path: self.image_path,
            components: self.components,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ManufacturerDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub address: String,
    pub contact_number: i64,
    pub profile_image_path: String,
    #[serde(default)]
    pub products: Vec<ObjectId>,
}

impl ManufacturerDocument {
    pub fn new(draft: ManufacturerDraft) -> CatalogResult<Self> {
        let products = object_ids(draft.products.as_deref().unwrap_or_default())?;
        Ok(Self {
            id: ObjectId::new(),
            name: draft.name,
            address: draft.address,
            contact_number: draft.contact_number,
            profile_image_path: draft.profile_image_path,
            products,
        })
    }

    pub fn update(draft: &ManufacturerDraft) -> CatalogResult<Document> {
        let mut set = doc! {
            "name": draft.name.as_str(),
            "address": draft.address.as_str(),
            "contactNumber": draft.contact_number,
            "profileImagePath": draft.profile_image_path.as_str(),
        };
        if let Some(products) = &draft.products {
            set.insert("products", object_ids(products)?);
        }
        Ok(doc! { "$set": set })
    }

    pub fn into_entity(self) -> CatalogResult<Manufacturer> {
        Ok(Manufacturer {
            id: typed_id(self.id)?,
            name: self.name,
            address: self.address,
            contact_number: self.contact_number,
            profile_image_path: self.profile_image_path,
            products: self
                .products
                .into_iter()
                .map(typed_id)
                .collect::<CatalogResult<_>>()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ComponentDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
}

impl ComponentDocument {
    pub fn new(draft: ComponentDraft) -> Self {
        Self {
            id: ObjectId::new(),
            name: draft.name,
            description: draft.description,
        }
    }

    pub fn update(draft: &ComponentDraft) -> Document {
        doc! {
            "$set": {
                "name": draft.name.as_str(),
                "description": draft.description.as_str(),
            }
        }
    }

    pub fn into_entity(self) -> CatalogResult<Component> {
        Ok(Component {
            id: typed_id(self.id)?,
            name: self.name,
            description: self.description,
        })
    }
}

/// Filter matching a single document by its typed id.
pub(crate) fn by_id(id: impl AsRef<str>) -> CatalogResult<Document> {
    Ok(doc! { "_id": object_id(id)? })
}
