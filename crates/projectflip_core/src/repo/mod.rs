//! Persistence boundary for store state.
//!
//! # Responsibility
//! - Define the load/save contract an owner uses to make store state durable.
//! - Isolate SQLite query details from the in-memory store.
//!
//! # Invariants
//! - Repositories work on whole `StoreState` values, never single records.
//! - Store mutators stay total; persistence errors surface only from explicit
//!   load/save calls.

pub mod snapshot_repo;
