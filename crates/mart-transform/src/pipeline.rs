//! End-to-end raw-to-clean pipelines.
//!
//! Each pipeline is deterministic and side-effect-free: identical raw input
//! produces byte-identical frames, which is what makes a rerun safe when
//! paired with an idempotent sink.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use polars::prelude::DataFrame;
use tracing::info;

use mart_model::{
    DIM_CATEGORIES_SCHEMA, DIM_EXCHANGE_RATE_SCHEMA, DIM_PRODUCTS_SCHEMA, ExchangeRate,
    FACT_SNAPSHOT_SCHEMA, FACT_TRENDS_SCHEMA, MartError, PipelineConfig, RawRecord,
    TrendObservation,
};

use crate::dedup::dedup_products;
use crate::frame::{dim_categories_frame, dim_products_frame, fact_frame, fx_frame, trends_frame};
use crate::normalize::normalize_record;
use crate::schema::enforce_schema;
use crate::split::split_batch;
use crate::trends::{TrendStats, melt_trends};

/// Counters for one product transformation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformStats {
    pub raw_records: usize,
    pub duplicates_removed: usize,
    pub rows_dropped_null_key: usize,
    pub fact_rows: usize,
    pub dim_rows: usize,
    pub category_rows: usize,
}

/// Schema-enforced output frames of the product pipeline.
#[derive(Debug)]
pub struct TransformOutput {
    pub fact: DataFrame,
    pub dim_products: DataFrame,
    pub dim_categories: DataFrame,
    pub stats: TransformStats,
}

/// Runs the full product transform for one calendar date.
///
/// # Errors
///
/// - [`MartError::EmptyRawZone`] when `records` is empty: the upstream
///   fetcher produced nothing and no transform is attempted.
/// - [`MartError::EmptyFactOutput`] when every row was dropped during
///   transformation.
pub fn run_product_pipeline(
    records: Vec<RawRecord>,
    date: NaiveDate,
    config: &PipelineConfig,
) -> Result<TransformOutput> {
    if records.is_empty() {
        return Err(MartError::EmptyRawZone { date }.into());
    }

    let mut stats = TransformStats {
        raw_records: records.len(),
        ..TransformStats::default()
    };
    info!(records = stats.raw_records, %date, "starting product transform");

    let normalized: Vec<_> = records
        .into_iter()
        .map(|record| normalize_record(record, config))
        .collect();

    let (deduped, duplicates_removed) = dedup_products(normalized);
    stats.duplicates_removed = duplicates_removed;

    let split = split_batch(&deduped);
    stats.rows_dropped_null_key = split.dropped_null_key;
    stats.fact_rows = split.facts.len();
    stats.dim_rows = split.products.len();
    stats.category_rows = split.categories.len();

    if split.facts.is_empty() {
        return Err(MartError::EmptyFactOutput { date }.into());
    }

    let fact = enforce_schema(fact_frame(&split.facts)?, FACT_SNAPSHOT_SCHEMA)?;
    let dim_products = enforce_schema(dim_products_frame(&split.products)?, DIM_PRODUCTS_SCHEMA)?;
    let dim_categories = enforce_schema(
        dim_categories_frame(&split.categories)?,
        DIM_CATEGORIES_SCHEMA,
    )?;

    info!(
        fact_rows = stats.fact_rows,
        dim_rows = stats.dim_rows,
        category_rows = stats.category_rows,
        duplicates_removed = stats.duplicates_removed,
        dropped_null_key = stats.rows_dropped_null_key,
        "product transform complete"
    );

    Ok(TransformOutput {
        fact,
        dim_products,
        dim_categories,
        stats,
    })
}

/// Output of the trend pipeline.
#[derive(Debug)]
pub struct TrendsOutput {
    pub frame: DataFrame,
    pub observations: Vec<TrendObservation>,
    pub stats: TrendStats,
}

/// Melts, aggregates, and schema-enforces a batch of wide trend records.
pub fn run_trends_pipeline(
    rows: &[RawRecord],
    observed_at: DateTime<Utc>,
) -> Result<TrendsOutput> {
    let (observations, stats) = melt_trends(rows, observed_at);
    let frame = enforce_schema(trends_frame(&observations)?, FACT_TRENDS_SCHEMA)?;
    Ok(TrendsOutput {
        frame,
        observations,
        stats,
    })
}

/// Builds the schema-enforced single-row exchange-rate frame.
pub fn run_fx_pipeline(rate: &ExchangeRate) -> Result<DataFrame> {
    enforce_schema(fx_frame(rate)?, DIM_EXCHANGE_RATE_SCHEMA)
}
