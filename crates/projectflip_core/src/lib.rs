//! Core state for the Project Flip marketing site.
//! Holds the in-memory entity store the UI reads and mutates.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod store;

pub use config::{ConfigError, SeedMode, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::client::{Client, NewClient};
pub use model::contact::{ContactSubmission, NewContact};
pub use model::id::EntityId;
pub use model::project::{NewProject, Project};
pub use model::subscriber::Subscriber;
pub use model::Record;
pub use repo::snapshot_repo::{RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository};
pub use store::entity_store::{EntityStore, RetiredIds, StoreState};
pub use store::observer::{Collection, Snapshot, StoreChange, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
