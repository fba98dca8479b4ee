//! Table batches and their load dispositions.

use chrono::NaiveDate;
use polars::prelude::DataFrame;

pub const FACT_PRODUCT_SNAPSHOTS: &str = "fact_product_snapshots";
pub const DIM_PRODUCTS: &str = "dim_products";
pub const DIM_CATEGORIES: &str = "dim_categories";
pub const FACT_SEARCH_TRENDS: &str = "fact_search_trends";
pub const DIM_EXCHANGE_RATES: &str = "dim_exchange_rates";

/// How a batch lands in its target table.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadDisposition {
    /// Delete all rows of the batch's date partition, then append. Reruns
    /// of the same date are idempotent.
    ReplacePartition { column: String, date: NaiveDate },
    /// Upsert by key columns. Columns listed in `protect` keep their
    /// existing value when the incoming one is null.
    MergeByKey {
        keys: Vec<String>,
        protect: Vec<String>,
    },
}

/// One schema-enforced frame bound for one warehouse table.
#[derive(Debug, Clone)]
pub struct TableBatch {
    pub name: String,
    pub disposition: LoadDisposition,
    pub frame: DataFrame,
}

impl TableBatch {
    pub fn fact_snapshots(frame: DataFrame, date: NaiveDate) -> Self {
        Self {
            name: FACT_PRODUCT_SNAPSHOTS.to_string(),
            disposition: LoadDisposition::ReplacePartition {
                column: "snapshot_date".to_string(),
                date,
            },
            frame,
        }
    }

    pub fn dim_products(frame: DataFrame) -> Self {
        Self {
            name: DIM_PRODUCTS.to_string(),
            disposition: LoadDisposition::MergeByKey {
                keys: vec!["product_id".to_string()],
                protect: Vec::new(),
            },
            frame,
        }
    }

    /// Category merge never lets an incoming null clobber the curated
    /// `standard_category` or an already known `category_name`.
    pub fn dim_categories(frame: DataFrame) -> Self {
        Self {
            name: DIM_CATEGORIES.to_string(),
            disposition: LoadDisposition::MergeByKey {
                keys: vec!["category_id".to_string()],
                protect: vec![
                    "category_name".to_string(),
                    "standard_category".to_string(),
                ],
            },
            frame,
        }
    }

    pub fn search_trends(frame: DataFrame) -> Self {
        Self {
            name: FACT_SEARCH_TRENDS.to_string(),
            disposition: LoadDisposition::MergeByKey {
                keys: vec!["date".to_string(), "keyword".to_string()],
                protect: Vec::new(),
            },
            frame,
        }
    }

    pub fn exchange_rates(frame: DataFrame, date: NaiveDate) -> Self {
        Self {
            name: DIM_EXCHANGE_RATES.to_string(),
            disposition: LoadDisposition::ReplacePartition {
                column: "date".to_string(),
                date,
            },
            frame,
        }
    }
}
