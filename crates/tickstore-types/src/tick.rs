//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TickError;

/// Exchange-assigned instrument identifier.
///
/// Not unique across ticks: every update for the same instrument carries the
/// same token.
pub type InstrumentToken = u32;

/// A single last-traded-price update for an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Instrument the update belongs to.
    pub instrument_token: InstrumentToken,
    /// Source timestamp of the update (UTC).
    pub timestamp: DateTime<Utc>,
    /// Last traded price.
    pub last_price: f64,
}

impl Tick {
    /// Creates a new tick without validating the price.
    #[must_use]
    pub const fn new(
        instrument_token: InstrumentToken,
        timestamp: DateTime<Utc>,
        last_price: f64,
    ) -> Self {
        Self {
            instrument_token,
            timestamp,
            last_price,
        }
    }

    /// Creates a new tick, rejecting NaN and infinite prices.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::NonFinitePrice`] if `last_price` is not finite.
    pub fn try_new(
        instrument_token: InstrumentToken,
        timestamp: DateTime<Utc>,
        last_price: f64,
    ) -> Result<Self, TickError> {
        if !last_price.is_finite() {
            return Err(TickError::NonFinitePrice {
                instrument_token,
                price: last_price,
            });
        }
        Ok(Self::new(instrument_token, timestamp, last_price))
    }

    /// Returns the timestamp as milliseconds since the Unix epoch.
    ///
    /// This is the precision ticks are persisted at.
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// Returns the start of the minute containing this tick.
    #[must_use]
    pub fn minute_bucket(&self) -> DateTime<Utc> {
        crate::truncate_to_minute(self.timestamp)
    }
}
