//! Newsletter subscriber model.
//!
//! # Invariants
//! - Email uniqueness is not enforced; repeated sign-ups are separate records.
//! - `subscribed_at` is assigned by the store at creation and never changes.

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// One newsletter sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: EntityId,
    pub email: String,
    /// Unix epoch milliseconds.
    pub subscribed_at: i64,
}
