//! Ticks command implementation.

use crate::display::{Records, write_records};
use anyhow::{Context, Result};
use std::path::Path;
use tickstore_lib::prelude::*;

/// Print the stored ticks of an instrument over a closed time range, in storage order.
pub(crate) async fn ticks(
    db: &Path,
    instrument_token: InstrumentToken,
    start: &str,
    end: &str,
    format: OutputFormat,
    output: Option<&Path>,
    header: bool,
) -> Result<()> {
    let (store, range) = super::open_for_query(db, start, end)?;
    let ticks = store
        .ticks(instrument_token, range)
        .await
        .context("Tick query failed")?;

    let records = Records::Ticks(&ticks);
    tracing::info!(instrument_token, %range, count = records.len(), "ticks fetched");
    write_records(records, output, format, header)
}
