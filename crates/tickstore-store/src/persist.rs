//! Transactional batch writes.

use async_trait::async_trait;
use rusqlite::{Connection, params};
use tickstore_types::Tick;

use crate::{Result, StoreError};

const INSERT_TICK: &str =
    "INSERT OR REPLACE INTO tickdata (instrument_token, timestamp, price) VALUES (?1, ?2, ?3)";

/// Destination for batches flushed by the ingestion pipeline.
///
/// A call either makes the whole batch durable or fails without leaving any
/// of it visible. Implementations must not retry internally.
#[async_trait]
pub trait BatchPersister: Send + Sync + 'static {
    /// Error reported when a batch could not be written.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes the batch, returning the number of ticks written.
    async fn persist(&self, batch: Vec<Tick>) -> std::result::Result<usize, Self::Error>;
}

/// Writes a batch of ticks inside a single transaction.
///
/// One insert statement is prepared and executed once per tick, in batch
/// order. Any failure rolls the transaction back, so no tick from a failed
/// batch is visible afterwards. An empty batch is a no-op.
///
/// # Errors
///
/// Returns the stage that failed: [`StoreError::Begin`],
/// [`StoreError::Prepare`], [`StoreError::Insert`] or [`StoreError::Commit`].
pub fn persist_batch(conn: &mut Connection, ticks: &[Tick]) -> Result<usize> {
    if ticks.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction().map_err(StoreError::Begin)?;
    {
        let mut stmt = tx.prepare(INSERT_TICK).map_err(StoreError::Prepare)?;
        for (index, tick) in ticks.iter().enumerate() {
            stmt.execute(params![
                tick.instrument_token,
                tick.timestamp_millis(),
                tick.last_price
            ])
            .map_err(|source| StoreError::Insert { index, source })?;
        }
    }
    tx.commit().map_err(StoreError::Commit)?;

    Ok(ticks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_schema;
    use chrono::{TimeZone, Utc};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn row_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM tickdata", [], |row| row.get(0))
            .unwrap()
    }

    fn make_ticks(prices: &[f64]) -> Vec<Tick> {
        prices
            .iter()
            .enumerate()
            .map(|(i, price)| {
                let ts = Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, i as u32).unwrap();
                Tick::new(633601, ts, *price)
            })
            .collect()
    }

    #[test]
    fn test_persist_batch_writes_all_rows() {
        let mut conn = setup();
        let written = persist_batch(&mut conn, &make_ticks(&[1.0, 2.0, 3.0])).unwrap();

        assert_eq!(written, 3);
        assert_eq!(row_count(&conn), 3);
    }

    #[test]
    fn test_persist_empty_batch_is_noop() {
        let mut conn = setup();
        assert_eq!(persist_batch(&mut conn, &[]).unwrap(), 0);
        assert_eq!(row_count(&conn), 0);
    }

    #[test]
    fn test_failed_insert_rolls_back_whole_batch() {
        let mut conn = setup();
        conn.execute_batch(
            "CREATE TRIGGER reject_negative BEFORE INSERT ON tickdata
             WHEN NEW.price < 0
             BEGIN SELECT RAISE(ABORT, 'negative price'); END;",
        )
        .unwrap();

        let err = persist_batch(&mut conn, &make_ticks(&[1.0, 2.0, -1.0, 4.0])).unwrap_err();

        assert!(matches!(err, StoreError::Insert { index: 2, .. }));
        assert!(err.is_persistence());
        assert_eq!(row_count(&conn), 0);
    }

    #[test]
    fn test_identical_rows_collapse() {
        let mut conn = setup();
        let ticks = make_ticks(&[1.0, 2.0]);

        persist_batch(&mut conn, &ticks).unwrap();
        persist_batch(&mut conn, &ticks).unwrap();

        assert_eq!(row_count(&conn), 2);
    }

    #[test]
    fn test_same_timestamp_different_price_is_kept() {
        let mut conn = setup();
        let ts = Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, 0).unwrap();
        let ticks = vec![Tick::new(633601, ts, 1.0), Tick::new(633601, ts, 1.5)];

        persist_batch(&mut conn, &ticks).unwrap();

        assert_eq!(row_count(&conn), 2);
    }
}
