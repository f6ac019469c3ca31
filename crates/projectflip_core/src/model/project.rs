//! Portfolio project model.

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// Showcase project rendered on the portfolio section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Site-relative or absolute image location.
    pub image_url: String,
}

/// Caller-supplied fields for a new project. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl NewProject {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }

    pub(crate) fn into_project(self, id: EntityId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
        }
    }
}
