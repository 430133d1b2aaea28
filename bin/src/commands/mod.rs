//! CLI command implementations.

pub(crate) mod candles;
pub(crate) mod ingest;
pub(crate) mod init;
pub(crate) mod ticks;

use crate::display::parse_timestamp;
use anyhow::{Context, Result, bail};
use std::path::Path;
use tickstore_lib::prelude::*;

/// Open an existing tick store and parse a closed query range.
pub(crate) fn open_for_query(db: &Path, start: &str, end: &str) -> Result<(TickStore, TimeRange)> {
    if !db.exists() {
        bail!("Database not found: {}", db.display());
    }

    let start = parse_timestamp(start).context("Invalid --start")?;
    let end = parse_timestamp(end).context("Invalid --end")?;
    let range = TimeRange::new(start, end)?;

    let store = TickStore::open(StoreConfig::new(db))
        .with_context(|| format!("Failed to open {}", db.display()))?;
    Ok((store, range))
}
