//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection persistence contract.
//! - Isolate SQLite details from service/business orchestration.
//!
//! # Invariants
//! - Persistence is whole-value: one key, one blob, last write wins.
//! - A malformed stored blob degrades to the empty collection; load paths
//!   never crash the application.

pub mod task_repo;
