//! Argument parsing helpers and output formatting for the tickstore CLI.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tickstore_lib::prelude::*;

/// Where candle aggregation runs.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Mode {
    /// Aggregate in SQL
    Store,
    /// Fetch raw ticks and aggregate in process
    Client,
}

impl From<Mode> for AggregationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Store => Self::Store,
            Mode::Client => Self::Client,
        }
    }
}

/// Parses an RFC3339 timestamp, or `YYYY-MM-DD HH:MM:SS` taken as UTC.
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").with_context(|| {
        format!("Invalid timestamp: {s} (expected RFC3339 or YYYY-MM-DD HH:MM:SS)")
    })?;
    Ok(naive.and_utc())
}

/// Rows to write out.
#[derive(Clone, Copy)]
pub(crate) enum Records<'a> {
    Candles(&'a [Candle]),
    Ticks(&'a [Tick]),
}

impl Records<'_> {
    pub(crate) const fn len(&self) -> usize {
        match self {
            Self::Candles(candles) => candles.len(),
            Self::Ticks(ticks) => ticks.len(),
        }
    }

    fn write_with<F: Formatter, W: Write + Send>(
        self,
        formatter: &F,
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Candles(candles) => formatter.write_candles(candles, writer),
            Self::Ticks(ticks) => formatter.write_ticks(ticks, writer),
        }
    }
}

/// Write records to a file, or stdout, in the specified format.
///
/// `header` only affects CSV and TSV output.
pub(crate) fn write_records(
    records: Records<'_>,
    output: Option<&Path>,
    format: OutputFormat,
    header: bool,
) -> Result<()> {
    let mut writer: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    match format {
        OutputFormat::Csv => {
            let formatter = CsvFormatter::new().with_header(header);
            records.write_with(&formatter, &mut writer)?;
        }
        OutputFormat::Tsv => {
            let formatter = CsvFormatter::tsv().with_header(header);
            records.write_with(&formatter, &mut writer)?;
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new();
            records.write_with(&formatter, &mut writer)?;
        }
        OutputFormat::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            records.write_with(&formatter, &mut writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let ts = parse_timestamp("2022-05-18T19:34:00+05:30").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, 0).unwrap());
    }

    #[test]
    fn test_parse_plain_datetime_as_utc() {
        let ts = parse_timestamp("2022-05-18 14:04:59").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, 59).unwrap());
    }

    #[test]
    fn test_parse_rejects_date_only() {
        assert!(parse_timestamp("2022-05-18").is_err());
    }

    #[test]
    fn test_write_candles_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("candles.ndjson");
        let bucket = Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, 0).unwrap();
        let candles = vec![Candle::new(633601, bucket, 156.85, 158.0, 156.0, 157.75)];

        write_records(
            Records::Candles(&candles),
            Some(path.as_path()),
            OutputFormat::Ndjson,
            true,
        )
        .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 1);
        assert!(written.contains("\"close\":157.75"));
    }

    #[test]
    fn test_write_ticks_as_tsv_without_header() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ticks.tsv");
        let ts = Utc.with_ymd_and_hms(2022, 5, 18, 14, 4, 0).unwrap();
        let ticks = vec![Tick::new(633601, ts, 156.85)];

        write_records(Records::Ticks(&ticks), Some(path.as_path()), OutputFormat::Tsv, false)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "2022-05-18T14:04:00.000Z\t633601\t156.85\n");
    }
}
