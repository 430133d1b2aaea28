//! Pooled async handle to the tick database.

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tickstore_aggregate::Candle;
use tickstore_types::{InstrumentToken, Tick, TimeRange};

use crate::{
    AggregationMode, BatchPersister, Result, StoreConfig, StoreError, fetch_candles, fetch_ticks,
    init_schema, persist_batch,
};

/// Shared handle to the tick database.
///
/// Cloning is cheap; clones share one connection pool. Each operation checks
/// out its own connection and runs on tokio's blocking thread pool, so the
/// persister and concurrent candle queries never contend on a shared lock.
#[derive(Debug, Clone)]
pub struct TickStore {
    pool: Pool<SqliteConnectionManager>,
}

impl TickStore {
    /// Opens (or creates) the database and ensures the tick table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built or the schema cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let busy_timeout = config.busy_timeout;
        let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
            conn.pragma_update(None, "synchronous", "NORMAL")
        });

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .build(manager)
            .map_err(|source| StoreError::Open {
                path: config.path.clone(),
                source,
            })?;

        init_schema(&*pool.get()?)?;
        tracing::debug!(
            path = %config.path.display(),
            pool_size = config.pool_size,
            "tick store opened"
        );

        Ok(Self { pool })
    }

    /// Writes a batch of ticks in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any stage of the transaction fails; nothing from
    /// the batch is visible in that case.
    pub async fn insert_batch(&self, ticks: Vec<Tick>) -> Result<usize> {
        self.with_connection(move |conn| persist_batch(conn, &ticks))
            .await
    }

    /// Fetches raw ticks for an instrument within a closed range.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub async fn ticks(
        &self,
        instrument_token: InstrumentToken,
        range: TimeRange,
    ) -> Result<Vec<Tick>> {
        self.with_connection(move |conn| fetch_ticks(conn, instrument_token, &range))
            .await
    }

    /// Derives one-minute candles for an instrument within a closed range.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails. No partial result is returned.
    pub async fn candles(
        &self,
        instrument_token: InstrumentToken,
        range: TimeRange,
        mode: AggregationMode,
    ) -> Result<Vec<Candle>> {
        self.with_connection(move |conn| fetch_candles(conn, instrument_token, &range, mode))
            .await
    }

    /// Runs blocking database work on a pooled connection.
    async fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            work(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {e}")))?
    }
}

#[async_trait]
impl BatchPersister for TickStore {
    type Error = StoreError;

    async fn persist(&self, batch: Vec<Tick>) -> Result<usize> {
        self.insert_batch(batch).await
    }
}
