//! tickstore CLI - Tick ingestion into SQLite and one-minute candle queries.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Mode;
use tickstore_lib::OutputFormat;
use logging::LogFormat;

#[derive(Parser)]
#[command(name = "tickstore")]
#[command(about = "Tick ingestion into SQLite with one-minute candle queries", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv). Overridden by TICKSTORE_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tick database and schema
    Init {
        /// Database file
        #[arg(long, env = "TICKSTORE_DB", default_value = "tickstore.db")]
        db: PathBuf,
    },

    /// Ingest newline-delimited JSON ticks from a file or stdin
    Ingest {
        /// Database file
        #[arg(long, env = "TICKSTORE_DB", default_value = "tickstore.db")]
        db: PathBuf,

        /// Subscribed instrument tokens, comma separated (omit to accept all)
        #[arg(short, long, env = "TICKSTORE_TOKENS", value_delimiter = ',')]
        tokens: Vec<u32>,

        /// Flush threshold. Defaults to 5 per subscribed token.
        #[arg(long, env = "TICKSTORE_DUMP_SIZE")]
        dump_size: Option<usize>,

        /// Input file. Defaults to stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Persist the partial batch when input ends instead of discarding it
        #[arg(long)]
        flush_on_close: bool,
    },

    /// Print one-minute OHLC candles for an instrument
    Candles {
        /// Database file
        #[arg(long, env = "TICKSTORE_DB", default_value = "tickstore.db")]
        db: PathBuf,

        /// Instrument token
        instrument_token: u32,

        /// Range start, inclusive (RFC3339 or "YYYY-MM-DD HH:MM:SS" UTC)
        #[arg(short, long)]
        start: String,

        /// Range end, inclusive (RFC3339 or "YYYY-MM-DD HH:MM:SS" UTC)
        #[arg(short, long)]
        end: String,

        /// Where aggregation runs
        #[arg(short, long, value_enum, default_value = "store")]
        mode: Mode,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print stored ticks for an instrument
    Ticks {
        /// Database file
        #[arg(long, env = "TICKSTORE_DB", default_value = "tickstore.db")]
        db: PathBuf,

        /// Instrument token
        instrument_token: u32,

        /// Range start, inclusive (RFC3339 or "YYYY-MM-DD HH:MM:SS" UTC)
        #[arg(short, long)]
        start: String,

        /// Range end, inclusive (RFC3339 or "YYYY-MM-DD HH:MM:SS" UTC)
        #[arg(short, long)]
        end: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// Output options shared by the query commands.
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format (csv, tsv, json, ndjson)
    #[arg(short, long, default_value = "csv")]
    format: OutputFormat,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Omit the header row (csv and tsv only)
    #[arg(long)]
    no_header: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_format)?;

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init { db } => commands::init::init(&db),
        Commands::Ingest {
            db,
            tokens,
            dump_size,
            input,
            flush_on_close,
        } => {
            commands::ingest::ingest(&db, tokens, dump_size, input.as_deref(), flush_on_close)
                .await
        }
        Commands::Candles {
            db,
            instrument_token,
            start,
            end,
            mode,
            output,
        } => {
            commands::candles::candles(
                &db,
                instrument_token,
                &start,
                &end,
                mode,
                output.format,
                output.output.as_deref(),
                !output.no_header,
            )
            .await
        }
        Commands::Ticks {
            db,
            instrument_token,
            start,
            end,
            output,
        } => {
            commands::ticks::ticks(
                &db,
                instrument_token,
                &start,
                &end,
                output.format,
                output.output.as_deref(),
                !output.no_header,
            )
            .await
        }
    }
}
