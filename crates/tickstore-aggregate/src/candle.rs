//! OHLC candle data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tickstore_types::InstrumentToken;

/// One-minute OHLC candle for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Instrument the candle summarises.
    pub instrument_token: InstrumentToken,
    /// Start of the minute bucket.
    pub bucket_start: DateTime<Utc>,
    /// Price of the earliest tick in the bucket.
    pub open: f64,
    /// Highest price in the bucket.
    pub high: f64,
    /// Lowest price in the bucket.
    pub low: f64,
    /// Price of the latest tick in the bucket.
    pub close: f64,
}

impl Candle {
    /// Creates a new candle.
    #[must_use]
    pub const fn new(
        instrument_token: InstrumentToken,
        bucket_start: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            instrument_token,
            bucket_start,
            open,
            high,
            low,
            close,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if the candle closed above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if the candle closed below its open.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}
