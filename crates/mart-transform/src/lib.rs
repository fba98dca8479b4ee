//! Transformation layer: raw marketplace records to warehouse-ready frames.
//!
//! The crate is organized around one pass per data source. Products go
//! through normalization, latest-wins deduplication, a fact/dimension split,
//! and schema enforcement. Search trends melt from wide provider exports
//! into long fact rows. Exchange rates become a single validated row per
//! date.

pub mod category;
pub mod dedup;
pub mod frame;
pub mod fx;
pub mod normalization;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod split;
pub mod trends;

pub use category::{CategoryInfo, build_category_dimension, parse_category_path};
pub use dedup::{aggregate_trends, dedup_products};
pub use fx::{build_fx_rate, fallback_fx_rate};
pub use normalize::{NormalizedProduct, normalize_record};
pub use pipeline::{
    TransformOutput, TransformStats, TrendsOutput, run_fx_pipeline, run_product_pipeline,
    run_trends_pipeline,
};
pub use schema::enforce_schema;
pub use split::{SplitRows, split_batch};
pub use trends::{TrendStats, melt_trends};
