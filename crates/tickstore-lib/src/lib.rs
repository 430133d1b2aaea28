//! Tick ingestion into SQLite with one-minute OHLC candle queries.
//!
//! This is a facade crate that re-exports functionality from the tickstore
//! workspace crates for convenient access.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickstore_types::*;

// Re-export aggregation
pub use tickstore_aggregate::{Candle, CandleAggregator, aggregate_candles};

// Re-export storage
#[cfg(feature = "store")]
pub use tickstore_store::{
    AggregationMode, BatchPersister, StoreConfig, StoreError, TickStore, fetch_candles,
    fetch_ticks, init_schema, persist_batch,
};

// Re-export ingestion
#[cfg(feature = "ingest")]
pub use tickstore_ingest::{
    IngestError, NdjsonSource, Pipeline, PipelineConfig, PipelineHandle, PipelineStats,
    StreamEvent, TickSender, TickSource, forward,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickstore_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use tickstore_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickstore_types::{InstrumentToken, Tick, TickError, TimeRange, TimeRangeError};

    pub use tickstore_aggregate::{Candle, aggregate_candles};

    #[cfg(feature = "store")]
    pub use tickstore_store::{AggregationMode, BatchPersister, StoreConfig, TickStore};

    #[cfg(feature = "ingest")]
    pub use tickstore_ingest::{
        IngestError, NdjsonSource, Pipeline, PipelineConfig, TickSender, TickSource,
    };

    #[cfg(feature = "format")]
    pub use tickstore_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};
}
