//! One-minute OHLC candle aggregation for tickstore.
//!
//! This crate provides tick-to-candle aggregation:
//!
//! - [`Candle`] - OHLC candle data structure
//! - [`CandleAggregator`] - Streaming aggregator over ordered ticks
//! - [`aggregate_candles`] - Sort-then-aggregate over arbitrary tick rows

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickstore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod candle;

pub use aggregator::{CandleAggregator, aggregate_candles};
pub use candle::Candle;
