//! Tick buffering and batched persistence for tickstore.
//!
//! - [`Pipeline`] - Starts the drain task behind a bounded conduit
//! - [`TickSender`] - Producer handle used by stream collaborators
//! - [`TickSource`] - Seam for anything that produces ticks
//! - [`NdjsonSource`] - Replays recorded ticks from newline-delimited JSON

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod ndjson;
mod pipeline;
mod source;

pub use config::PipelineConfig;
pub use error::IngestError;
pub use ndjson::NdjsonSource;
pub use pipeline::{Pipeline, PipelineHandle, PipelineStats, TickSender};
pub use source::{StreamEvent, TickSource, forward};
