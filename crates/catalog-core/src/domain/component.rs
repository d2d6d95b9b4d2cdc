//! Component entity.

use crate::{ComponentId, Entity};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A standalone component record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub description: String,
}

impl Component {
    /// Builds a component from a draft and the id assigned by the store.
    #[must_use]
    pub fn from_draft(id: ComponentId, draft: ComponentDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
        }
    }
}

impl Entity for Component {
    type Id = ComponentId;

    const RESOURCE_TYPE: &'static str = "Component";

    fn id(&self) -> &ComponentId {
        &self.id
    }
}

/// Fields accepted when creating or replacing a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComponentDraft {
    #[validate(length(min = 3, max = 255))]
    pub name: String,

    #[validate(length(min = 3, max = 255))]
    pub description: String,
}
