//! Tick-to-candle aggregation.

use chrono::{DateTime, Utc};
use tickstore_types::{InstrumentToken, Tick, truncate_to_minute};

use crate::Candle;

/// Streaming one-minute candle aggregator.
///
/// Expects ticks ordered by `(instrument_token, timestamp)`. A candle is
/// emitted as soon as a tick for a different instrument or minute arrives.
#[derive(Debug, Default)]
pub struct CandleAggregator {
    current: Option<CandleBuilder>,
}

impl CandleAggregator {
    /// Creates a new aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Processes a tick, potentially emitting a completed candle.
    ///
    /// Returns `Some(candle)` when this tick starts a new bucket,
    /// `None` otherwise.
    pub fn process(&mut self, tick: &Tick) -> Option<Candle> {
        let bucket = truncate_to_minute(tick.timestamp);

        match self.current.take() {
            Some(mut builder) if builder.is_same_bucket(tick.instrument_token, bucket) => {
                builder.update(tick);
                self.current = Some(builder);
                None
            }
            Some(builder) => {
                self.current = Some(CandleBuilder::new(bucket, tick));
                Some(builder.finish())
            }
            None => {
                self.current = Some(CandleBuilder::new(bucket, tick));
                None
            }
        }
    }

    /// Finishes aggregation, returning any remaining partial candle.
    #[must_use]
    pub fn finish(self) -> Option<Candle> {
        self.current.map(CandleBuilder::finish)
    }
}

/// Derives candles from an unordered collection of ticks.
///
/// Ticks are stably sorted by `(instrument_token, timestamp)`, so ticks that
/// share a timestamp keep their input order. Callers reading from the store
/// pass rows in storage order, which makes the tie-break identical to the
/// one the SQL query applies. The result is ordered by instrument, then by
/// bucket start ascending.
#[must_use]
pub fn aggregate_candles(ticks: impl IntoIterator<Item = Tick>) -> Vec<Candle> {
    let mut ticks: Vec<Tick> = ticks.into_iter().collect();
    ticks.sort_by_key(|tick| (tick.instrument_token, tick.timestamp));

    let mut aggregator = CandleAggregator::new();
    let mut candles = Vec::new();

    for tick in &ticks {
        if let Some(candle) = aggregator.process(tick) {
            candles.push(candle);
        }
    }

    if let Some(candle) = aggregator.finish() {
        candles.push(candle);
    }

    candles
}

/// Builder for a single candle.
#[derive(Debug)]
struct CandleBuilder {
    instrument_token: InstrumentToken,
    bucket_start: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl CandleBuilder {
    fn new(bucket_start: DateTime<Utc>, tick: &Tick) -> Self {
        let price = tick.last_price;
        Self {
            instrument_token: tick.instrument_token,
            bucket_start,
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }

    fn is_same_bucket(&self, instrument_token: InstrumentToken, bucket: DateTime<Utc>) -> bool {
        self.instrument_token == instrument_token && self.bucket_start == bucket
    }

    fn update(&mut self, tick: &Tick) {
        let price = tick.last_price;
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
    }

    const fn finish(self) -> Candle {
        Candle::new(
            self.instrument_token,
            self.bucket_start,
            self.open,
            self.high,
            self.low,
            self.close,
        )
    }
}
