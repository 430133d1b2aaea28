//! Core types for the tickstore tick ingestion pipeline.
//!
//! This crate provides the fundamental data structures used throughout tickstore:
//!
//! - [`Tick`] - A single last-price update for an instrument
//! - [`TimeRange`] - Closed time interval for candle queries
//! - [`truncate_to_minute`] - Minute bucketing shared by every aggregation path

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod tick;
mod time_range;

pub use error::{TickError, TimeRangeError};
pub use tick::{InstrumentToken, Tick};
pub use time_range::{MINUTE_MILLIS, TimeRange, truncate_millis_to_minute, truncate_to_minute};
