//! Client testimonial model.

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// Client testimonial shown in the "happy clients" section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    /// Testimonial text.
    pub description: String,
    /// Role and company, e.g. `CEO, TechFlow`.
    pub designation: String,
    pub image_url: String,
}

/// Caller-supplied fields for a new client. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub description: String,
    pub designation: String,
    pub image_url: String,
}

impl NewClient {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        designation: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            designation: designation.into(),
            image_url: image_url.into(),
        }
    }

    pub(crate) fn into_client(self, id: EntityId) -> Client {
        Client {
            id,
            name: self.name,
            description: self.description,
            designation: self.designation,
            image_url: self.image_url,
        }
    }
}
