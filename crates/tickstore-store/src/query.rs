//! Candle and raw tick queries.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Row, params};
use tickstore_aggregate::{Candle, aggregate_candles};
use tickstore_types::{InstrumentToken, Tick, TimeRange};

use crate::{Result, StoreError};

/// Raw rows in storage order. The trailing sort keys reproduce the primary
/// key, which is what makes ties at equal timestamps deterministic.
const SELECT_TICKS: &str = "
    SELECT instrument_token, timestamp, price
    FROM tickdata
    WHERE instrument_token = ?1 AND timestamp >= ?2 AND timestamp <= ?3
    ORDER BY timestamp, instrument_token, price
";

/// One-minute candles computed by the engine.
///
/// The bucket expression floors towards negative infinity; `%` in SQLite
/// truncates, so the remainder is normalised first.
const SELECT_CANDLES: &str = "
    SELECT instrument_token,
           bucket,
           MIN(open)  AS open,
           MAX(price) AS high,
           MIN(price) AS low,
           MIN(close) AS close
    FROM (
        SELECT instrument_token,
               timestamp - ((timestamp % 60000) + 60000) % 60000 AS bucket,
               price,
               FIRST_VALUE(price) OVER bucket_window AS open,
               LAST_VALUE(price)  OVER bucket_window AS close
        FROM tickdata
        WHERE instrument_token = ?1 AND timestamp >= ?2 AND timestamp <= ?3
        WINDOW bucket_window AS (
            PARTITION BY instrument_token,
                         timestamp - ((timestamp % 60000) + 60000) % 60000
            ORDER BY timestamp, price
            ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING
        )
    )
    GROUP BY instrument_token, bucket
    ORDER BY bucket ASC
";

/// Where candle aggregation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AggregationMode {
    /// The SQL engine groups and aggregates.
    #[default]
    Store,
    /// Raw rows are fetched and aggregated in process.
    Client,
}

impl AggregationMode {
    /// Returns the mode as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Client => "client",
        }
    }
}

impl std::fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fetches the raw ticks of one instrument within a closed range, in storage order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is invalid.
pub fn fetch_ticks(
    conn: &Connection,
    instrument_token: InstrumentToken,
    range: &TimeRange,
) -> Result<Vec<Tick>> {
    let mut stmt = conn.prepare_cached(SELECT_TICKS)?;
    let rows = stmt.query_map(
        params![instrument_token, range.start_millis(), range.end_millis()],
        |row| {
            Ok((
                row.get::<_, InstrumentToken>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, f64>(2)?,
            ))
        },
    )?;

    let mut ticks = Vec::new();
    for row in rows {
        let (token, millis, price) = row?;
        ticks.push(Tick::new(token, from_millis(millis)?, price));
    }
    Ok(ticks)
}

/// Computes one-minute candles for an instrument within a closed range.
///
/// Both modes produce identical output for the same stored rows. An empty
/// range yields an empty vector.
///
/// # Errors
///
/// Returns an error if the query fails or a stored timestamp is invalid.
pub fn fetch_candles(
    conn: &Connection,
    instrument_token: InstrumentToken,
    range: &TimeRange,
    mode: AggregationMode,
) -> Result<Vec<Candle>> {
    match mode {
        AggregationMode::Store => query_candles(conn, instrument_token, range),
        AggregationMode::Client => {
            let ticks = fetch_ticks(conn, instrument_token, range)?;
            Ok(aggregate_candles(ticks))
        }
    }
}

fn query_candles(
    conn: &Connection,
    instrument_token: InstrumentToken,
    range: &TimeRange,
) -> Result<Vec<Candle>> {
    let mut stmt = conn.prepare_cached(SELECT_CANDLES)?;
    let rows = stmt.query_map(
        params![instrument_token, range.start_millis(), range.end_millis()],
        candle_row,
    )?;

    let mut candles = Vec::new();
    for row in rows {
        let (token, bucket, open, high, low, close) = row?;
        candles.push(Candle::new(token, from_millis(bucket)?, open, high, low, close));
    }
    Ok(candles)
}

type CandleRow = (InstrumentToken, i64, f64, f64, f64, f64);

fn candle_row(row: &Row<'_>) -> rusqlite::Result<CandleRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(StoreError::CorruptTimestamp { millis })
}
