//! `linefold` command-line entry point.
//!
//! ```text
//! linefold measurements.txt
//! cat measurements.txt | linefold --mode stream -
//! ```

use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use linefold::{Input, ScanConfig, ScanMode, Summary, run};

#[derive(Debug, Parser)]
#[command(name = "linefold", version, about = "Per-name min/mean/max over a `name;value` line file")]
struct Args {
    /// Input file, or `-` for standard input.
    input: Input,

    /// Execution strategy.
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Streaming read block size in bytes.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Mapped-mode segment size in bytes.
    #[arg(long)]
    segment_size: Option<usize>,

    /// Number of worker threads (defaults to the number of cores).
    #[arg(short, long)]
    workers: Option<usize>,

    /// Log run details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Auto,
    Stream,
    Mapped,
}

impl From<Mode> for ScanMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Auto => ScanMode::Auto,
            Mode::Stream => ScanMode::Stream,
            Mode::Mapped => ScanMode::Mapped,
        }
    }
}

impl Args {
    fn config(&self) -> ScanConfig {
        let mut config = ScanConfig::default();
        if let Some(size) = self.chunk_size {
            config = config.with_chunk_size(size);
        }
        if let Some(size) = self.segment_size {
            config = config.with_segment_size(size);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let config = args.config();
    let started = Instant::now();
    let table = run(&args.input, args.mode.into(), &config)
        .with_context(|| format!("failed to aggregate {}", args.input))?;
    info!(
        "{} names, {} records in {:.2?}",
        table.len(),
        table.total_count(),
        started.elapsed()
    );

    let stdout = io::stdout();
    Summary(&table)
        .write_to(BufWriter::new(stdout.lock()))
        .context("failed to write summary")?;
    Ok(())
}
