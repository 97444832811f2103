//! CLI argument definitions using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use scour::OutputFormat;
use std::path::PathBuf;

/// Scour: deterministic cleaning for messy order data
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic messy order dataset
    Generate {
        /// Number of base records (duplicates are appended on top)
        #[arg(short, long, default_value = "1000")]
        rows: usize,

        /// RNG seed; the same seed always produces the same dataset
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Messiness level between 0.0 (clean) and 1.0 (maximally messy)
        #[arg(short, long, default_value = "0.6")]
        messiness: f64,

        /// Earliest order date (YYYY-MM-DD)
        #[arg(long, default_value = "2020-01-01")]
        start_date: NaiveDate,

        /// Latest order date (YYYY-MM-DD)
        #[arg(long, default_value = "2023-12-31")]
        end_date: NaiveDate,

        /// Output path for the generated CSV
        #[arg(short, long, default_value = "orders.csv")]
        output: PathBuf,
    },

    /// Clean a data file and write the annotated record set
    Clean {
        /// Path to the data file (CSV/TSV, delimiter auto-detected)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>.cleaned.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,

        /// IQR fence multiplier for outlier detection
        #[arg(short = 'k', long, default_value = "1.5")]
        fence_multiplier: f64,

        /// Also write the quality report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Clean a data file and print only the quality report
    Report {
        /// Path to the data file (CSV/TSV, delimiter auto-detected)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,

        /// IQR fence multiplier for outlier detection
        #[arg(short = 'k', long, default_value = "1.5")]
        fence_multiplier: f64,
    },
}
