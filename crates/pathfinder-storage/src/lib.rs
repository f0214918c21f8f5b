//! PathFinder Storage - Storage backends for the weighted graph
//!
//! This crate provides the backends that persist nodes and edges, plus the
//! idempotent CSV seed loader.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod seed;
pub mod traits;

#[cfg(feature = "redb")]
pub mod redb;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub mod memory;

pub use error::{StorageError, StorageResult};
pub use seed::{load_edges_csv, load_nodes_csv, load_seed, SeedReport};
pub use traits::StorageBackend;

#[cfg(feature = "redb")]
pub use redb::RedbStorage;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

pub use memory::MemoryStorage;
