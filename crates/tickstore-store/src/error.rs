//! Error types for the tick store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while writing or reading ticks.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to build the connection pool.
    #[error("Failed to open tick store '{path}': {source}")]
    Open {
        /// Database path that could not be opened.
        path: PathBuf,
        /// The underlying pool error.
        source: r2d2::Error,
    },

    /// Failed to check a connection out of the pool.
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Failed to create the tick table.
    #[error("Failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// Failed to open a write transaction.
    #[error("Failed to begin transaction: {0}")]
    Begin(#[source] rusqlite::Error),

    /// Failed to prepare the insert statement.
    #[error("Failed to prepare insert statement: {0}")]
    Prepare(#[source] rusqlite::Error),

    /// A single insert within the batch failed.
    #[error("Failed to insert tick {index} of batch: {source}")]
    Insert {
        /// Position of the failing tick within the batch.
        index: usize,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to commit the transaction.
    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] rusqlite::Error),

    /// A read query failed.
    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// A stored timestamp is outside the representable range.
    #[error("Stored timestamp {millis}ms is out of range")]
    CorruptTimestamp {
        /// The raw stored value.
        millis: i64,
    },

    /// The blocking task running the database work did not complete.
    #[error("Store task failed: {0}")]
    Task(String),
}

impl StoreError {
    /// Returns true if the error happened while writing a batch.
    ///
    /// Everything else is a read-side (query) failure or a setup failure.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Begin(_) | Self::Prepare(_) | Self::Insert { .. } | Self::Commit(_)
        )
    }
}
