//! Replays newline-delimited JSON ticks as a stream.

use async_trait::async_trait;
use tickstore_types::{InstrumentToken, Tick};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{StreamEvent, TickSender, TickSource};

/// A [`TickSource`] reading one JSON tick per line.
///
/// Each line looks like
/// `{"instrument_token":633601,"timestamp":"2022-05-18T14:04:00Z","last_price":156.85}`.
/// Blank lines are skipped. Lines that are not UTF-8, fail to parse, or carry
/// a non-finite price are reported as [`StreamEvent::Error`] and skipped.
#[derive(Debug)]
pub struct NdjsonSource<R> {
    reader: R,
}

impl<R> NdjsonSource<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[async_trait]
impl<R> TickSource for NdjsonSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    type Error = std::io::Error;

    async fn run(
        &mut self,
        tokens: &[InstrumentToken],
        sink: TickSender,
    ) -> Result<(), Self::Error> {
        StreamEvent::Connected.log();

        let mut buf = Vec::new();
        let mut line_no = 0u64;
        loop {
            buf.clear();
            if self.reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            line_no += 1;

            let Ok(line) = std::str::from_utf8(&buf) else {
                StreamEvent::Error(format!("line {line_no}: invalid UTF-8")).log();
                continue;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let tick = match parse_line(line) {
                Ok(tick) => tick,
                Err(reason) => {
                    StreamEvent::Error(format!("line {line_no}: {reason}")).log();
                    continue;
                }
            };
            if !tokens.is_empty() && !tokens.contains(&tick.instrument_token) {
                continue;
            }

            if sink.send(tick).await.is_err() {
                StreamEvent::Closed {
                    code: StreamEvent::NORMAL_CLOSURE,
                    reason: "pipeline closed".to_string(),
                }
                .log();
                return Ok(());
            }
        }

        StreamEvent::Closed {
            code: StreamEvent::NORMAL_CLOSURE,
            reason: "end of input".to_string(),
        }
        .log();
        Ok(())
    }
}

fn parse_line(line: &str) -> Result<Tick, String> {
    let raw: Tick = serde_json::from_str(line).map_err(|e| e.to_string())?;
    Tick::try_new(raw.instrument_token, raw.timestamp, raw.last_price).map_err(|e| e.to_string())
}
