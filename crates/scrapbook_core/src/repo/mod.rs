//! Persistence layer abstractions and implementations.
//!
//! # Responsibility
//! - Define the storage contract for the four persisted snapshot slices.
//! - Isolate SQLite details from the store's business logic.
//!
//! # Invariants
//! - Entry writes are last-write-wins; all writes originate from the
//!   single-threaded store mutation path.

pub mod snapshot_repo;
