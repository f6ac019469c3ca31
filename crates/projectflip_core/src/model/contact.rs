//! Contact form submission model.
//!
//! # Invariants
//! - `submitted_at` is assigned by the store at creation and never changes.

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// One submission of the public contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: EntityId,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    /// Unix epoch milliseconds.
    pub submitted_at: i64,
}

/// Contact form fields as entered by the visitor.
///
/// The store does not validate these; the form layer owns input checks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
}

impl NewContact {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        mobile: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            mobile: mobile.into(),
            city: city.into(),
        }
    }

    pub(crate) fn into_submission(self, id: EntityId, submitted_at: i64) -> ContactSubmission {
        ContactSubmission {
            id,
            full_name: self.full_name,
            email: self.email,
            mobile: self.mobile,
            city: self.city,
            submitted_at,
        }
    }
}
