//! Ingest command implementation.
//!
//! Replays newline-delimited JSON ticks through the batching pipeline into
//! the tick store.

use anyhow::{Context, Result};
use std::path::Path;
use tickstore_lib::prelude::*;
use tokio::io::{AsyncBufRead, BufReader};

/// Ingest ticks from `input` (or stdin) until it ends.
///
/// Fails if a batch could not be persisted.
pub(crate) async fn ingest(
    db: &Path,
    tokens: Vec<InstrumentToken>,
    dump_size: Option<usize>,
    input: Option<&Path>,
    flush_on_close: bool,
) -> Result<()> {
    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let store = TickStore::open(StoreConfig::new(db))
        .with_context(|| format!("Failed to open {}", db.display()))?;
    let config = PipelineConfig {
        tokens,
        dump_size,
        flush_on_close,
    };
    let (sender, handle) = Pipeline::start(&config, store)?;

    let mut source = NdjsonSource::new(reader);
    let read_result = source.run(&config.tokens, sender).await;

    // The pipeline outcome decides the exit status; a lost batch outranks a read error.
    let stats = handle.join().await.context("Ingestion stopped")?;
    read_result.context("Failed to read tick input")?;

    println!(
        "Ingested {} ticks in {} batches ({} received, {} discarded)",
        stats.ticks_flushed, stats.batches_flushed, stats.ticks_received, stats.ticks_discarded
    );
    Ok(())
}
