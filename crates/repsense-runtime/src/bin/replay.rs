//! Replay a recorded landmark stream through a tracking session
//!
//! Built with the `cli` feature:
//! `cargo run -p repsense-runtime --features cli -- frames.jsonl`

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use repsense_runtime::{init_tracing, load_catalogue, replay, LogFormat, TrackingSession};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "repsense-replay")]
#[command(about = "Count repetitions in a recorded pose landmark stream")]
#[command(version)]
struct Args {
    /// JSON-lines file of frames
    frames: PathBuf,

    /// Exercise to count
    #[arg(short, long, default_value = "pushup", env = "REPSENSE_EXERCISE")]
    exercise: String,

    /// Extra exercise definitions (JSON array), merged over the built-ins
    #[arg(short, long, env = "REPSENSE_CATALOGUE")]
    catalogue: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format.into()).context("Failed to initialize tracing")?;

    let catalogue = load_catalogue(args.catalogue.as_deref())?;
    let mut session = TrackingSession::with_catalogue(catalogue, &args.exercise)
        .with_context(|| format!("Cannot track exercise '{}'", args.exercise))?;

    let file = File::open(&args.frames)
        .with_context(|| format!("Failed to open {}", args.frames.display()))?;
    let summary = replay(BufReader::new(file), &mut session)?;

    info!(
        stats = ?session.stats(),
        lines = summary.lines,
        unparseable = summary.unparseable,
        "replay finished"
    );
    println!("{}", serde_json::to_string(&session.snapshot())?);

    Ok(())
}
