//! Storage error types

use pathfinder_core::{EdgeId, NodeId, ValidationError};
use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Node with id {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge with id {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Source node with id {0} not found")]
    SourceNotFound(NodeId),

    #[error("Destination node with id {0} not found")]
    DestinationNotFound(NodeId),

    #[error("Node with name '{0}' already exists")]
    DuplicateNode(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "redb")]
    #[error("ReDB error: {0}")]
    Redb(#[from] ::redb::Error),

    #[cfg(feature = "redb")]
    #[error("ReDB database error: {0}")]
    RedbDatabase(#[from] ::redb::DatabaseError),

    #[cfg(feature = "redb")]
    #[error("ReDB table error: {0}")]
    RedbTable(#[from] ::redb::TableError),

    #[cfg(feature = "redb")]
    #[error("ReDB storage error: {0}")]
    RedbStorage(#[from] ::redb::StorageError),

    #[cfg(feature = "redb")]
    #[error("ReDB commit error: {0}")]
    RedbCommit(#[from] ::redb::CommitError),

    #[cfg(feature = "redb")]
    #[error("ReDB transaction error: {0}")]
    RedbTransaction(#[from] ::redb::TransactionError),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] ::rusqlite::Error),
}

impl StorageError {
    /// Whether the error means "the thing you asked for does not exist"
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::EdgeNotFound(_))
    }

    /// Whether the error is a rejected input rather than a backend failure
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound(_)
                | Self::DestinationNotFound(_)
                | Self::DuplicateNode(_)
                | Self::Validation(_)
        )
    }
}
