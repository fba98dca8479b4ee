//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use mart_ingest::{load_snapshot_batch, read_trends_csv};
use mart_model::{
    DIM_CATEGORIES_SCHEMA, DIM_EXCHANGE_RATE_SCHEMA, DIM_PRODUCTS_SCHEMA, FACT_SNAPSHOT_SCHEMA,
    FACT_TRENDS_SCHEMA, PipelineConfig, RateSource,
};
use mart_transform::{
    build_fx_rate, fallback_fx_rate, run_fx_pipeline, run_product_pipeline, run_trends_pipeline,
};
use mart_warehouse::{
    CleanZoneWriter, DIM_CATEGORIES, DIM_EXCHANGE_RATES, DIM_PRODUCTS, FACT_PRODUCT_SNAPSHOTS,
    FACT_SEARCH_TRENDS,
};

use crate::cli::{FxRateArgs, ProductsArgs, TrendsArgs};

/// One output table of a run, for the summary.
pub struct TableOutcome {
    pub table: String,
    pub rows: usize,
    pub path: Option<PathBuf>,
}

/// Result of one subcommand run.
pub struct RunResult {
    pub date: NaiveDate,
    pub dry_run: bool,
    pub tables: Vec<TableOutcome>,
    pub raw_records: usize,
    pub duplicates_removed: usize,
    pub rows_dropped: usize,
}

pub fn run_products(args: &ProductsArgs) -> Result<RunResult> {
    let span = info_span!("products", date = %args.date);
    let _guard = span.enter();

    let config = PipelineConfig::default()
        .with_raw_zone_root(&args.raw_root)
        .with_clean_zone_root(&args.clean_root);

    let records = load_snapshot_batch(&config.raw_zone_root, args.date)
        .context("load raw snapshot partition")?;
    let output = run_product_pipeline(records, args.date, &config)?;

    let writer = CleanZoneWriter::new(&config.clean_zone_root);
    let mut tables = Vec::new();
    for (name, frame) in [
        (FACT_PRODUCT_SNAPSHOTS, output.fact),
        (DIM_PRODUCTS, output.dim_products),
        (DIM_CATEGORIES, output.dim_categories),
    ] {
        tables.push(write_table(&writer, name, args.date, frame, args.dry_run)?);
    }

    Ok(RunResult {
        date: args.date,
        dry_run: args.dry_run,
        tables,
        raw_records: output.stats.raw_records,
        duplicates_removed: output.stats.duplicates_removed,
        rows_dropped: output.stats.rows_dropped_null_key,
    })
}

pub fn run_trends(args: &TrendsArgs) -> Result<RunResult> {
    let now = Utc::now();
    let date = args.date.unwrap_or_else(|| now.date_naive());
    let span = info_span!("trends", %date);
    let _guard = span.enter();

    let rows = read_trends_csv(&args.input).context("read trend export")?;
    let output = run_trends_pipeline(&rows, now)?;

    let writer = CleanZoneWriter::new(&args.clean_root);
    let table = write_table(&writer, FACT_SEARCH_TRENDS, date, output.frame, args.dry_run)?;

    Ok(RunResult {
        date,
        dry_run: args.dry_run,
        tables: vec![table],
        raw_records: output.stats.raw_rows,
        duplicates_removed: output.stats.duplicates_removed,
        rows_dropped: output.stats.rows_skipped_bad_date,
    })
}

pub fn run_fx_rate(args: &FxRateArgs) -> Result<RunResult> {
    let now = Utc::now();
    let span = info_span!("fx_rate", date = %args.date);
    let _guard = span.enter();

    let config = PipelineConfig::default().with_clean_zone_root(&args.clean_root);
    let rate = match args.rate {
        Some(value) => {
            let source = RateSource::Live(
                args.source.clone().unwrap_or_else(|| "manual".to_string()),
            );
            build_fx_rate(value, source, args.date, now, &config)?
        }
        None => fallback_fx_rate(args.date, now, &config),
    };
    let frame = run_fx_pipeline(&rate)?;

    let writer = CleanZoneWriter::new(&config.clean_zone_root);
    let table = write_table(&writer, DIM_EXCHANGE_RATES, args.date, frame, args.dry_run)?;

    Ok(RunResult {
        date: args.date,
        dry_run: args.dry_run,
        tables: vec![table],
        raw_records: 1,
        duplicates_removed: 0,
        rows_dropped: 0,
    })
}

/// Table name and ordered column list, for the `schemas` subcommand.
pub fn table_schemas() -> Vec<(&'static str, &'static [&'static str])> {
    vec![
        (FACT_PRODUCT_SNAPSHOTS, FACT_SNAPSHOT_SCHEMA),
        (DIM_PRODUCTS, DIM_PRODUCTS_SCHEMA),
        (DIM_CATEGORIES, DIM_CATEGORIES_SCHEMA),
        (FACT_SEARCH_TRENDS, FACT_TRENDS_SCHEMA),
        (DIM_EXCHANGE_RATES, DIM_EXCHANGE_RATE_SCHEMA),
    ]
}

fn write_table(
    writer: &CleanZoneWriter,
    table: &str,
    date: NaiveDate,
    mut frame: DataFrame,
    dry_run: bool,
) -> Result<TableOutcome> {
    let rows = frame.height();
    let path = if dry_run {
        info!(table, rows, "dry run, skipping write");
        None
    } else {
        Some(writer.write(table, date, &mut frame)?)
    };
    Ok(TableOutcome {
        table: table.to_string(),
        rows,
        path,
    })
}
