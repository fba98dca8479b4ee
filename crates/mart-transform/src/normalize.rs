//! Record normalization: raw source records to typed product rows.
//!
//! Source field names are renamed to canonical schema names first, so the
//! value parsers only ever see canonical names. Untyped data does not
//! survive past this module.

use chrono::{DateTime, NaiveDate, Utc};
use mart_model::{PipelineConfig, RawRecord, RawValue};

use crate::category::CategoryInfo;
use crate::normalization::datetime::{parse_observed_at, parse_snapshot_date};
use crate::normalization::numeric::{clean_price, parse_discount_rate, parse_sales_volume};

/// Source-specific field names mapped to canonical ones, applied before any
/// parsing.
const RENAME_MAP: &[(&str, &str)] = &[
    ("_extracted_at", "observed_at"),
    ("thumbnail_url", "image_url"),
    ("seller", "seller_name"),
    ("brand", "brand_name"),
    ("quantity_sold", "sales_volume"),
    ("rating", "rating_average"),
];

/// A fully typed product observation. Nothing here is validated yet: the
/// splitter drops rows whose required keys are missing.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProduct {
    pub product_id: Option<i64>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub seller_id: Option<i64>,
    pub seller_name: Option<String>,
    pub seller_logo: Option<String>,
    pub current_price: Option<i64>,
    pub original_price: Option<i64>,
    pub discount_rate: i64,
    pub sales_volume_acc: i64,
    pub review_count: Option<i64>,
    pub rating_average: Option<f64>,
    pub inventory_status: bool,
    pub feature_flag: bool,
    pub snapshot_date: Option<NaiveDate>,
    pub observed_at: Option<DateTime<Utc>>,
    pub category: CategoryInfo,
    pub category_name: Option<String>,
    pub category_url: Option<String>,
}

/// Normalizes one raw record into a typed product row.
pub fn normalize_record(mut record: RawRecord, config: &PipelineConfig) -> NormalizedProduct {
    for (from, to) in RENAME_MAP {
        record.rename(from, to);
    }

    let observed_at = record.str_field("observed_at").and_then(parse_observed_at);
    let snapshot_date = record
        .str_field("observed_at")
        .and_then(parse_snapshot_date);

    let current_price = clean_price(record.get("price"));
    let original_price = clean_price(record.get("original_price"));

    let category = CategoryInfo {
        category_id: coerce_i64(record.get("category_id")),
        root_category_id: coerce_i64(record.get("root_category_id")),
        category_depth: coerce_i64(record.get("category_depth")),
    }
    .resolve(
        record.str_field("category_path"),
        record.str_field("_category_url"),
    );

    NormalizedProduct {
        product_id: coerce_i64(record.get("product_id")),
        sku: coerce_string(record.get("sku")),
        name: coerce_string(record.get("name")),
        brand_name: coerce_string(record.get("brand_name")),
        image_url: coerce_string(record.get("image_url")),
        product_url: coerce_string(record.get("product_url")),
        seller_id: coerce_i64(record.get("seller_id")),
        seller_name: coerce_string(record.get("seller_name")),
        seller_logo: coerce_string(record.get("seller_logo")),
        current_price,
        original_price,
        discount_rate: parse_discount_rate(record.get("discount_rate")),
        sales_volume_acc: parse_sales_volume(record.get("sales_volume")),
        review_count: coerce_i64(record.get("review_count")),
        rating_average: coerce_f64(record.get("rating_average")),
        // In stock iff a positive price was observed.
        inventory_status: current_price.is_some_and(|p| p > 0),
        feature_flag: has_feature_tag(record.get("badges"), &config.feature_tag),
        snapshot_date,
        observed_at,
        category,
        category_name: coerce_string(record.get("category_name")),
        category_url: coerce_string(record.get("_category_url")),
    }
}

/// Case-insensitive membership test for the feature badge. The badge
/// collection may be absent, a list, or a bare string.
fn has_feature_tag(badges: Option<&RawValue>, tag: &str) -> bool {
    let tag = tag.to_lowercase();
    match badges {
        None => false,
        Some(RawValue::List(items)) => items
            .iter()
            .filter_map(RawValue::as_str)
            .any(|item| item.to_lowercase() == tag),
        Some(RawValue::Str(text)) => text.to_lowercase().contains(&tag),
        Some(_) => false,
    }
}

/// Lenient integer coercion: native numbers truncate, digit strings parse.
fn coerce_i64(value: Option<&RawValue>) -> Option<i64> {
    match value? {
        RawValue::Str(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|v| v.trunc() as i64))
        }
        other => other.as_i64(),
    }
}

/// Lenient float coercion for ratings and similar metrics.
fn coerce_f64(value: Option<&RawValue>) -> Option<f64> {
    match value? {
        RawValue::Str(text) => text.trim().parse().ok(),
        other => other.as_f64(),
    }
}

/// String coercion: numeric ids that arrive as numbers are stringified,
/// blank strings read as missing.
fn coerce_string(value: Option<&RawValue>) -> Option<String> {
    match value? {
        RawValue::Str(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        RawValue::Int(v) => Some(v.to_string()),
        RawValue::Float(v) => Some(v.to_string()),
        _ => None,
    }
}
