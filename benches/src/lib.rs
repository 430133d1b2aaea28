//! Benchmark utilities for tickstore.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tickstore_lib::{InstrumentToken, Tick};

/// Shape of a synthetic tick stream.
#[derive(Debug, Clone)]
pub struct SyntheticTicks {
    /// Number of distinct instruments.
    pub tokens: u32,
    /// Ticks generated per instrument.
    pub ticks_per_token: usize,
    /// Gap between consecutive ticks of one instrument.
    pub interval: TimeDelta,
    /// Timestamp of the first tick.
    pub start: DateTime<Utc>,
    /// Seed for the price walk.
    pub seed: u64,
}

impl Default for SyntheticTicks {
    fn default() -> Self {
        Self {
            tokens: 10,
            ticks_per_token: 6_000,
            interval: TimeDelta::milliseconds(250),
            start: Utc.with_ymd_and_hms(2022, 5, 18, 9, 15, 0).single().unwrap_or_default(),
            seed: 0x5eed,
        }
    }
}

impl SyntheticTicks {
    /// Instrument tokens used by the generator.
    pub fn instrument_tokens(&self) -> Vec<InstrumentToken> {
        (0..self.tokens).map(|i| 100_000 + i).collect()
    }

    /// Generates ticks interleaved across instruments in arrival order.
    pub fn generate(&self) -> Vec<Tick> {
        let tokens = self.instrument_tokens();
        let mut prices: Vec<f64> = tokens.iter().map(|&t| f64::from(t % 1_000) + 100.0).collect();
        let mut state = self.seed;
        let mut ticks = Vec::with_capacity(tokens.len() * self.ticks_per_token);

        for step in 0..self.ticks_per_token {
            let timestamp = self.start + self.interval * step as i32;
            for (token, price) in tokens.iter().zip(prices.iter_mut()) {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let step = ((state >> 33) % 21) as f64 - 10.0;
                *price = (*price + step * 0.05).max(0.05);
                ticks.push(Tick::new(*token, timestamp, *price));
            }
        }

        ticks
    }

    /// Total number of ticks [`Self::generate`] returns.
    pub fn len(&self) -> usize {
        self.tokens as usize * self.ticks_per_token
    }

    /// Returns true if the generator produces no ticks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let config = SyntheticTicks {
            tokens: 3,
            ticks_per_token: 50,
            ..Default::default()
        };
        let a = config.generate();
        assert_eq!(a.len(), config.len());
        assert_eq!(a, config.generate());
        assert!(a.iter().all(|t| t.last_price > 0.0));
    }

    #[test]
    fn test_ticks_advance_per_step() {
        let config = SyntheticTicks {
            tokens: 2,
            ticks_per_token: 3,
            ..Default::default()
        };
        let ticks = config.generate();
        assert_eq!(ticks[0].timestamp, ticks[1].timestamp);
        assert_eq!(ticks[2].timestamp - ticks[0].timestamp, config.interval);
    }
}
