//! CLI argument definitions for the mart ETL.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mart-etl",
    version,
    about = "Marketplace ETL - Transform raw listings into a star-schema mart",
    long_about = "Transform raw marketplace snapshots, search-trend exports, and\n\
                  exchange-rate quotes into schema-enforced warehouse batches.\n\
                  Clean-zone output is partitioned Parquet."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Transform one day of raw product snapshots into fact and dimension
    /// partitions.
    Products(ProductsArgs),

    /// Transform a wide search-trend export into the long trend fact table.
    Trends(TrendsArgs),

    /// Build the daily exchange-rate row.
    FxRate(FxRateArgs),

    /// List the warehouse tables and their column schemas.
    Schemas,
}

#[derive(Parser)]
pub struct ProductsArgs {
    /// Snapshot date to process (YYYY-MM-DD).
    #[arg(long = "date", value_name = "DATE")]
    pub date: NaiveDate,

    /// Raw zone root holding products/snapshot_date=DATE/*.json.
    #[arg(long = "raw-root", value_name = "DIR")]
    pub raw_root: PathBuf,

    /// Clean zone root for Parquet output.
    #[arg(long = "clean-root", value_name = "DIR")]
    pub clean_root: PathBuf,

    /// Transform and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct TrendsArgs {
    /// Wide trend CSV export (one column per keyword).
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Clean zone root for Parquet output.
    #[arg(long = "clean-root", value_name = "DIR")]
    pub clean_root: PathBuf,

    /// Partition date for the output (default: today, UTC).
    #[arg(long = "date", value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Transform and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct FxRateArgs {
    /// Rate date (YYYY-MM-DD).
    #[arg(long = "date", value_name = "DATE")]
    pub date: NaiveDate,

    /// Quote from a live provider. Without this the configured fallback
    /// constant is used.
    #[arg(long = "rate", value_name = "RATE")]
    pub rate: Option<f64>,

    /// Provider name recorded alongside --rate.
    #[arg(long = "source", value_name = "NAME", requires = "rate")]
    pub source: Option<String>,

    /// Clean zone root for Parquet output.
    #[arg(long = "clean-root", value_name = "DIR")]
    pub clean_root: PathBuf,

    /// Build and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
