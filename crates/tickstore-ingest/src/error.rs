//! Error types for the ingestion pipeline.

use thiserror::Error;

/// Errors that can occur while configuring or running the pipeline.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Neither an explicit dump size nor any subscribed instrument was given.
    #[error("Dump size must be at least 1: set it explicitly or subscribe to at least one instrument")]
    ZeroDumpSize,

    /// The drain task has stopped and no longer accepts ticks.
    #[error("Ingestion pipeline is closed")]
    Closed,

    /// A batch could not be written. The pipeline stops on this error.
    #[error("Failed to persist batch of {batch_len} ticks: {source}")]
    Persistence {
        /// Number of ticks in the batch that was lost.
        batch_len: usize,
        /// The persister's error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The drain task panicked or was cancelled.
    #[error("Drain task failed: {0}")]
    Task(String),
}
