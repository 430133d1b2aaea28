//! Tick table layout and store configuration.

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

use crate::{Result, StoreError};

/// DDL for the tick table.
///
/// The primary key is the ordering key: time first, then instrument, so
/// range scans over a time window stay sequential. Rows with an identical
/// key collapse into one.
const CREATE_TICK_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS tickdata (
        instrument_token INTEGER NOT NULL,
        timestamp        INTEGER NOT NULL,
        price            REAL    NOT NULL,
        PRIMARY KEY (timestamp, instrument_token, price)
    ) WITHOUT ROWID
";

/// Configuration for opening a [`TickStore`](crate::TickStore).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("tickstore.db"),
            pool_size: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration for the given database path with default pool settings.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the maximum pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }
}

/// Creates the tick table if it does not exist yet.
///
/// # Errors
///
/// Returns [`StoreError::Schema`] if the DDL fails.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TICK_TABLE)
        .map_err(StoreError::Schema)
}
