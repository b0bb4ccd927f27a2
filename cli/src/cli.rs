//! Command-line argument surface, parsed with `clap`'s derive API.

use std::path::PathBuf;

use clap::Parser;

const DEFAULT_BASE: i64 = 2;
const DEFAULT_EXPONENT: i64 = -3;
const DEFAULT_PERCENTILES_PRECISION: f64 = 0.01;

/// Updates a histogram from values read from stdin and displays the
/// resulting histogram or its percentiles.
///
/// If FILE is given, it is loaded (when present) before reading stdin, and
/// saved after, so long-running observers can refine their picture of a
/// distribution across process restarts.
#[derive(Parser, Debug)]
#[command(name = "histosketch", version)]
pub struct Args {
    /// Base of the histogram's logarithmic bucketing scheme.
    #[arg(short = 'b', long = "base", default_value_t = DEFAULT_BASE, value_parser = parse_positive_base)]
    pub base: i64,

    /// Initial scale exponent.
    #[arg(short = 'e', long = "exponent", default_value_t = DEFAULT_EXPONENT)]
    pub exponent: i64,

    /// Show the percentile table instead of the raw bin dump.
    #[arg(short = 'p', long = "percentiles")]
    pub percentiles: bool,

    /// Set the percentile table's step size. Implies `-p`.
    #[arg(short = 'P', long = "precision", value_name = "PRECISION")]
    pub precision: Option<f64>,

    /// Suppress normal output.
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Optional persistence path: loaded if present, saved on exit.
    pub file: Option<PathBuf>,
}

impl Args {
    /// `true` if the percentile table should be shown, either because `-p`
    /// was passed directly or because `-P` was.
    #[must_use]
    pub fn show_percentiles(&self) -> bool {
        self.percentiles || self.precision.is_some()
    }

    /// The effective percentile step size: the `-P` value if given, else the
    /// default.
    #[must_use]
    pub fn percentiles_precision(&self) -> f64 {
        self.precision.unwrap_or(DEFAULT_PERCENTILES_PRECISION)
    }
}

fn parse_positive_base(s: &str) -> Result<i64, String> {
    let value: i64 = s.parse().map_err(|_| format!("'{s}' is not an integer"))?;
    if value <= 0 {
        return Err(format!("base must be greater than 0, got {value}"));
    }
    Ok(value)
}
