//! Candles command implementation.

use crate::display::{Mode, Records, write_records};
use anyhow::{Context, Result};
use std::path::Path;
use tickstore_lib::prelude::*;

/// Print one-minute candles for an instrument over a closed time range.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn candles(
    db: &Path,
    instrument_token: InstrumentToken,
    start: &str,
    end: &str,
    mode: Mode,
    format: OutputFormat,
    output: Option<&Path>,
    header: bool,
) -> Result<()> {
    let (store, range) = super::open_for_query(db, start, end)?;
    let mode = AggregationMode::from(mode);
    let candles = store
        .candles(instrument_token, range, mode)
        .await
        .context("Candle query failed")?;

    let records = Records::Candles(&candles);
    tracing::info!(instrument_token, %range, %mode, count = records.len(), "candles computed");
    write_records(records, output, format, header)
}
