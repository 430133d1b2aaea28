//! SQLite-backed tick storage for tickstore.
//!
//! This crate provides the durable side of the pipeline:
//!
//! - [`TickStore`] - Pooled async handle used by the persister and candle queries
//! - [`persist_batch`] - All-or-nothing transactional batch write
//! - [`BatchPersister`] - Seam the ingestion pipeline flushes batches through
//! - [`fetch_candles`] - One-minute OHLC candles, aggregated in SQL or in process

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod persist;
mod query;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use persist::{BatchPersister, persist_batch};
pub use query::{AggregationMode, fetch_candles, fetch_ticks};
pub use schema::{StoreConfig, init_schema};
pub use store::TickStore;
