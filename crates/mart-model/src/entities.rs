//! Typed star-schema entity rows.
//!
//! Every entity here is fully typed with explicit nullability: a field that
//! may be missing in the source is an `Option`, a field guaranteed by
//! row-level validation is not. Raw data never crosses into these types
//! without going through the record normalizer.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One daily fact row per product. `product_id` and `current_price` are
/// guaranteed non-null: rows violating that are dropped during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub snapshot_date: Option<NaiveDate>,
    pub product_id: i64,
    pub current_price: i64,
    pub original_price: Option<i64>,
    pub discount_rate: i64,
    pub sales_volume_acc: i64,
    pub review_count: Option<i64>,
    pub rating_average: Option<f64>,
    pub inventory_status: bool,
    pub feature_flag: bool,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Slowly changing product attributes, merged by `product_id` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDimension {
    pub product_id: i64,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub seller_id: Option<i64>,
    pub seller_name: Option<String>,
    pub seller_logo: Option<String>,
    /// Leaf (deepest) category id.
    pub category_id: Option<i64>,
    /// Root (level 1) category id.
    pub root_category_id: Option<i64>,
    pub category_depth: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category dimension row. `standard_category` is always null here; it is
/// curated manually downstream and the warehouse merge must never overwrite
/// it with null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDimension {
    pub category_id: i64,
    pub category_name: Option<String>,
    /// 1 = root, 2 = sub, 3 = leaf. Deeper hierarchies are capped at 3.
    pub category_level: i64,
    /// "root > leaf", or just the leaf id when the category is its own root.
    pub full_path: String,
    pub url_key: Option<String>,
    /// Root id when the category sits below the root level, else null.
    pub parent_id: Option<i64>,
    pub standard_category: Option<String>,
}

/// One search-trend score, unique by (date, keyword) after aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendObservation {
    pub date: NaiveDate,
    pub keyword: String,
    pub score: i64,
    pub is_partial: bool,
    pub observed_at: DateTime<Utc>,
}

/// Provenance of an exchange-rate row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateSource {
    /// Fetched from a live provider; carries the provider name.
    Live(String),
    /// Constant used when the provider was unavailable.
    Fallback,
}

impl RateSource {
    pub fn as_str(&self) -> &str {
        match self {
            RateSource::Live(provider) => provider.as_str(),
            RateSource::Fallback => "fallback",
        }
    }
}

/// Daily exchange rate, one row per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub date: NaiveDate,
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
    pub source: RateSource,
    pub observed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_source_labels() {
        assert_eq!(RateSource::Live("open.er-api.com".into()).as_str(), "open.er-api.com");
        assert_eq!(RateSource::Fallback.as_str(), "fallback");
    }
}
