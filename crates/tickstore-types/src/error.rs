//! Error types for tickstore values.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::InstrumentToken;

/// Error for ticks that cannot be represented.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TickError {
    /// Price is NaN or infinite.
    #[error("Non-finite price {price} for instrument {instrument_token}")]
    NonFinitePrice {
        /// The instrument the tick was for.
        instrument_token: InstrumentToken,
        /// The rejected price.
        price: f64,
    },
}

/// Error for invalid time ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// Start is after end.
    #[error("Invalid time range: {start} > {end}")]
    Inverted {
        /// The start timestamp.
        start: DateTime<Utc>,
        /// The end timestamp.
        end: DateTime<Utc>,
    },
}
