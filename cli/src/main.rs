//! Command-line front end for the `histosketch` streaming histogram.
//!
//! Reads whitespace-separated floating-point samples from standard input,
//! folds them into a histogram (optionally seeded from a persisted FILE),
//! prints either the raw bin dump or a percentile table, and — if FILE was
//! given — saves the updated histogram back to it.

mod cli;
mod input;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use histosketch::{Context, Histogram, HistogramError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    install_logging();
    let args = cli::Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn install_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &cli::Args) -> histosketch::Result<()> {
    let mut histogram = load_or_fresh(args)?;

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading samples from stdin")?;

    for value in input::parse_samples(&text) {
        histogram.update(value).context("updating histogram")?;
    }

    if !args.quiet {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        if args.show_percentiles() {
            histogram
                .display_percentiles(&mut out, args.percentiles_precision())
                .context("writing percentile table")?;
        } else {
            histogram.display(&mut out).context("writing histogram")?;
        }
        out.flush().context("flushing stdout")?;
    }

    if let Some(path) = &args.file {
        save(&histogram, path)?;
    }

    Ok(())
}

fn load_or_fresh(args: &cli::Args) -> histosketch::Result<Histogram> {
    let Some(path) = &args.file else {
        return Histogram::new(args.base, args.exponent);
    };

    if !path.exists() {
        tracing::warn!(path = %path.display(), "file does not exist, starting a fresh histogram");
        return Histogram::new(args.base, args.exponent);
    }

    let mut file = File::open(path)
        .context(format!("opening {} for loading", path.display()))?;
    Histogram::load(&mut file).context(format!("loading histogram from {}", path.display()))
}

fn save(histogram: &Histogram, path: &Path) -> histosketch::Result<()> {
    let mut file =
        File::create(path).context(format!("opening {} for saving", path.display()))?;
    histogram
        .save(&mut file)
        .context(format!("saving histogram to {}", path.display()))
}

fn report_error(err: &HistogramError) {
    eprintln!("histosketch: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
