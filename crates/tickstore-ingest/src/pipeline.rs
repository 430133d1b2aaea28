//! Bounded tick conduit and the batching drain task.

use std::time::Instant;

use tickstore_store::BatchPersister;
use tickstore_types::Tick;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{IngestError, PipelineConfig};

/// Producer side of the pipeline.
///
/// Clones share the same conduit. The pipeline closes once every clone has
/// been dropped.
#[derive(Debug, Clone)]
pub struct TickSender {
    tx: mpsc::Sender<Tick>,
}

impl TickSender {
    /// Hands a tick to the pipeline, waiting while the conduit is full.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Closed`] if the drain task has stopped.
    pub async fn send(&self, tick: Tick) -> Result<(), IngestError> {
        self.tx.send(tick).await.map_err(|_| IngestError::Closed)
    }

    /// Hands a tick to the pipeline from a thread outside the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Closed`] if the drain task has stopped.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_send(&self, tick: Tick) -> Result<(), IngestError> {
        self.tx.blocking_send(tick).map_err(|_| IngestError::Closed)
    }

    /// Returns true once the drain task has stopped accepting ticks.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Returns the number of ticks that can be sent without waiting.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tx.capacity()
    }
}

/// Counters reported by a finished pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Ticks taken off the conduit.
    pub ticks_received: u64,
    /// Batches written successfully.
    pub batches_flushed: u64,
    /// Ticks written successfully.
    pub ticks_flushed: u64,
    /// Ticks left in the partial batch at close and never written.
    pub ticks_discarded: u64,
}

/// Handle to the running drain task.
#[derive(Debug)]
pub struct PipelineHandle {
    task: JoinHandle<Result<PipelineStats, IngestError>>,
}

impl PipelineHandle {
    /// Waits for the drain task to stop.
    ///
    /// The task stops when every [`TickSender`] has been dropped, or on the
    /// first failed flush.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Persistence`] if a batch could not be written, or
    /// [`IngestError::Task`] if the task panicked or was aborted.
    pub async fn join(self) -> Result<PipelineStats, IngestError> {
        self.task
            .await
            .map_err(|e| IngestError::Task(e.to_string()))?
    }

    /// Returns true if the drain task has stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Entry point for starting an ingestion pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline;

impl Pipeline {
    /// Spawns the drain task and returns the producer handle with it.
    ///
    /// The conduit holds at most `dump_size` ticks. The drain task flushes
    /// whenever its buffer holds more than `dump_size` ticks, so each full
    /// batch contains `dump_size + 1` ticks in arrival order.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::ZeroDumpSize`] if the configuration resolves to
    /// a dump size of zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<P: BatchPersister>(
        config: &PipelineConfig,
        persister: P,
    ) -> Result<(TickSender, PipelineHandle), IngestError> {
        let dump_size = config.dump_size()?;
        let (tx, rx) = mpsc::channel(dump_size);

        tracing::info!(
            tokens = config.tokens.len(),
            dump_size,
            flush_on_close = config.flush_on_close,
            "ingestion pipeline started"
        );

        let drain = Drain {
            persister,
            dump_size,
            flush_on_close: config.flush_on_close,
            stats: PipelineStats::default(),
        };
        let task = tokio::spawn(drain.run(rx));

        Ok((TickSender { tx }, PipelineHandle { task }))
    }
}

struct Drain<P> {
    persister: P,
    dump_size: usize,
    flush_on_close: bool,
    stats: PipelineStats,
}

impl<P: BatchPersister> Drain<P> {
    async fn run(mut self, mut rx: mpsc::Receiver<Tick>) -> Result<PipelineStats, IngestError> {
        let mut buffer = Vec::with_capacity(self.dump_size + 1);

        while let Some(tick) = rx.recv().await {
            self.stats.ticks_received += 1;
            buffer.push(tick);

            if buffer.len() > self.dump_size {
                let batch = std::mem::replace(&mut buffer, Vec::with_capacity(self.dump_size + 1));
                // Dropping `rx` on error closes every sender.
                self.flush(batch).await?;
            }
        }

        if !buffer.is_empty() {
            if self.flush_on_close {
                self.flush(buffer).await?;
            } else {
                tracing::warn!(
                    discarded = buffer.len(),
                    "pipeline closed with a partial batch; ticks not persisted"
                );
                self.stats.ticks_discarded += buffer.len() as u64;
            }
        }

        tracing::info!(
            received = self.stats.ticks_received,
            batches = self.stats.batches_flushed,
            flushed = self.stats.ticks_flushed,
            discarded = self.stats.ticks_discarded,
            "ingestion pipeline stopped"
        );
        Ok(self.stats)
    }

    async fn flush(&mut self, batch: Vec<Tick>) -> Result<(), IngestError> {
        let batch_len = batch.len();
        let started = Instant::now();

        match self.persister.persist(batch).await {
            Ok(written) => {
                self.stats.batches_flushed += 1;
                self.stats.ticks_flushed += batch_len as u64;
                tracing::debug!(
                    batch_len,
                    written,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "batch persisted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(batch_len, error = %e, "batch persistence failed; stopping pipeline");
                Err(IngestError::Persistence {
                    batch_len,
                    source: Box::new(e),
                })
            }
        }
    }
}
