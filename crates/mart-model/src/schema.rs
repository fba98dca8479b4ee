//! Target warehouse schemas.
//!
//! Ordered column lists for every table the pipeline hands to the warehouse
//! sink. The schema enforcer guarantees each output frame carries exactly
//! these columns in this order.

/// Daily product fact table, partitioned by `snapshot_date`.
pub const FACT_SNAPSHOT_SCHEMA: &[&str] = &[
    "snapshot_date",
    "product_id",
    "current_price",
    "original_price",
    "discount_rate",
    "sales_volume_acc",
    "review_count",
    "rating_average",
    "inventory_status",
    "feature_flag",
    "observed_at",
];

/// Product dimension, merged by `product_id`.
pub const DIM_PRODUCTS_SCHEMA: &[&str] = &[
    "product_id",
    "sku",
    "name",
    "brand_name",
    "image_url",
    "product_url",
    "seller_id",
    "seller_name",
    "seller_logo",
    "category_id",
    "root_category_id",
    "category_depth",
    "created_at",
    "updated_at",
];

/// Category dimension, merged by `category_id`. `category_name` and
/// `standard_category` are protected during merge: an incoming null never
/// replaces a curated value.
pub const DIM_CATEGORIES_SCHEMA: &[&str] = &[
    "category_id",
    "category_name",
    "category_level",
    "full_path",
    "url_key",
    "parent_id",
    "standard_category",
];

/// Search-trend fact table, merged by (`date`, `keyword`).
pub const FACT_TRENDS_SCHEMA: &[&str] = &["date", "keyword", "score", "is_partial", "observed_at"];

/// Exchange-rate dimension, replaced by `date` partition.
pub const DIM_EXCHANGE_RATE_SCHEMA: &[&str] = &[
    "date",
    "from_currency",
    "to_currency",
    "rate",
    "source",
    "observed_at",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn schemas_have_no_duplicate_columns() {
        for schema in [
            FACT_SNAPSHOT_SCHEMA,
            DIM_PRODUCTS_SCHEMA,
            DIM_CATEGORIES_SCHEMA,
            FACT_TRENDS_SCHEMA,
            DIM_EXCHANGE_RATE_SCHEMA,
        ] {
            let unique: BTreeSet<&str> = schema.iter().copied().collect();
            assert_eq!(unique.len(), schema.len());
        }
    }
}
