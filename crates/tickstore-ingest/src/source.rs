//! The seam between a market-data stream and the pipeline.

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tickstore_types::{InstrumentToken, Tick};

use crate::{IngestError, TickSender};

/// Lifecycle events reported by a stream collaborator.
///
/// The reconnect variants are for live transports implementing
/// [`TickSource`]; finite sources such as [`NdjsonSource`](crate::NdjsonSource)
/// never reconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// The stream is connected and subscribed.
    Connected,
    /// A recoverable error; the stream keeps running.
    Error(String),
    /// The stream closed.
    Closed {
        /// Close code reported by the transport.
        code: u16,
        /// Close reason reported by the transport.
        reason: String,
    },
    /// The stream is about to reconnect.
    Reconnecting {
        /// Attempt number, starting at 1.
        attempt: u32,
        /// Delay before the attempt.
        delay: Duration,
    },
    /// Reconnection gave up.
    ReconnectExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
}

impl StreamEvent {
    /// Normal closure code used when a finite source runs out of input.
    pub const NORMAL_CLOSURE: u16 = 1000;

    /// Writes the event to the log at a level matching its severity.
    pub fn log(&self) {
        match self {
            Self::Connected => tracing::info!("tick stream connected"),
            Self::Error(message) => tracing::warn!(error = %message, "tick stream error"),
            Self::Closed { code, reason } => {
                tracing::info!(code, reason = %reason, "tick stream closed");
            }
            Self::Reconnecting { attempt, delay } => tracing::warn!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                "tick stream reconnecting"
            ),
            Self::ReconnectExhausted { attempts } => {
                tracing::error!(attempts, "tick stream gave up reconnecting");
            }
        }
    }
}

/// A producer of ticks for a set of subscribed instruments.
///
/// Implementations push every tick they receive into `sink` and return when
/// their input ends or the pipeline closes.
#[async_trait]
pub trait TickSource: Send {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Streams ticks for `tokens` into `sink`. An empty token list means
    /// every instrument the source carries.
    async fn run(&mut self, tokens: &[InstrumentToken], sink: TickSender)
    -> Result<(), Self::Error>;
}

/// Pushes every tick of `stream` into `sink` in order.
///
/// Returns the number of ticks forwarded once the stream ends.
///
/// # Errors
///
/// Returns [`IngestError::Closed`] if the pipeline stops first.
pub async fn forward<S>(stream: S, sink: &TickSender) -> Result<u64, IngestError>
where
    S: Stream<Item = Tick> + Send,
{
    futures::pin_mut!(stream);
    let mut forwarded = 0;
    while let Some(tick) = stream.next().await {
        sink.send(tick).await?;
        forwarded += 1;
    }
    Ok(forwarded)
}
