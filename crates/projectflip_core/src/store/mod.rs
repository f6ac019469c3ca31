//! Entity store and its change notification.
//!
//! # Responsibility
//! - Hold the four site collections for the lifetime of the owning UI root.
//! - Keep UI code decoupled from snapshot bookkeeping and id generation.
//!
//! # Invariants
//! - Readers only ever observe complete snapshots.
//! - The store has no dependency on UI or persistence code.

pub mod entity_store;
pub mod observer;
