//! Domain records held by the entity store.
//!
//! # Responsibility
//! - Define the four flat record kinds and their creation inputs.
//! - Keep the UI-facing wire shape (camelCase field names) in one place.
//!
//! # Invariants
//! - Records carry no nested structure and no cross-collection references.
//! - Ids are always assigned by the store, never by creation inputs.

pub mod client;
pub mod contact;
pub mod id;
pub mod project;
pub mod subscriber;

use client::Client;
use contact::ContactSubmission;
use id::EntityId;
use project::Project;
use subscriber::Subscriber;

/// Common access to the store-assigned identifier of a record.
pub trait Record {
    fn id(&self) -> &EntityId;
}

impl Record for Project {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for Client {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for ContactSubmission {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Record for Subscriber {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
