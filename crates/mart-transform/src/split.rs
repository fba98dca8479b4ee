//! Splitting a normalized batch into fact and dimension row sets.
//!
//! Row-level validation lives here too: a snapshot without a product id or
//! price cannot join anything downstream, so the whole row is dropped and
//! counted.

use std::collections::HashSet;

use mart_model::{CategoryDimension, ProductDimension, ProductSnapshot};
use tracing::warn;

use crate::category::build_category_dimension;
use crate::normalize::NormalizedProduct;

/// Row sets for the three output tables.
#[derive(Debug, Default)]
pub struct SplitRows {
    pub facts: Vec<ProductSnapshot>,
    pub products: Vec<ProductDimension>,
    pub categories: Vec<CategoryDimension>,
    /// Rows dropped for a missing product id or price.
    pub dropped_null_key: usize,
}

/// Splits deduplicated rows into fact, product-dimension, and
/// category-dimension sets.
pub fn split_batch(rows: &[NormalizedProduct]) -> SplitRows {
    let mut out = SplitRows::default();
    let mut seen_categories: HashSet<i64> = HashSet::new();

    for row in rows {
        let (Some(product_id), Some(current_price)) = (row.product_id, row.current_price) else {
            out.dropped_null_key += 1;
            continue;
        };

        out.facts.push(ProductSnapshot {
            snapshot_date: row.snapshot_date,
            product_id,
            current_price,
            original_price: row.original_price,
            discount_rate: row.discount_rate,
            sales_volume_acc: row.sales_volume_acc,
            review_count: row.review_count,
            rating_average: row.rating_average,
            inventory_status: row.inventory_status,
            feature_flag: row.feature_flag,
            observed_at: row.observed_at,
        });

        out.products.push(ProductDimension {
            product_id,
            sku: row.sku.clone(),
            name: row.name.clone(),
            brand_name: row.brand_name.clone(),
            image_url: row.image_url.clone(),
            product_url: row.product_url.clone(),
            seller_id: row.seller_id,
            seller_name: row.seller_name.clone(),
            seller_logo: row.seller_logo.clone(),
            category_id: row.category.category_id,
            root_category_id: row.category.root_category_id,
            category_depth: row.category.category_depth,
            created_at: row.observed_at,
            updated_at: row.observed_at,
        });

        // One category row per distinct id, first occurrence wins.
        if let Some(category_id) = row.category.category_id
            && seen_categories.insert(category_id)
            && let Some(category) = build_category_dimension(
                &row.category,
                row.category_name.as_deref(),
                row.category_url.as_deref(),
            )
        {
            out.categories.push(category);
        }
    }

    if out.dropped_null_key > 0 {
        warn!(
            dropped = out.dropped_null_key,
            "dropped rows with null product_id or price"
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mart_model::{PipelineConfig, RawRecord, RawValue};

    use crate::normalize::normalize_record;

    fn row(fields: &[(&str, RawValue)]) -> NormalizedProduct {
        let record: RawRecord = fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect();
        normalize_record(record, &PipelineConfig::default())
    }

    #[test]
    fn drops_rows_without_required_keys() {
        let rows = vec![
            row(&[("product_id", RawValue::Int(1)), ("price", RawValue::Int(100))]),
            row(&[("product_id", RawValue::Int(2))]), // no price
            row(&[("price", RawValue::Int(50))]),     // no id
        ];
        let split = split_batch(&rows);
        assert_eq!(split.facts.len(), 1);
        assert_eq!(split.products.len(), 1);
        assert_eq!(split.dropped_null_key, 2);
    }

    #[test]
    fn categories_are_unique_first_wins() {
        let rows = vec![
            row(&[
                ("product_id", RawValue::Int(1)),
                ("price", RawValue::Int(100)),
                ("category_path", RawValue::Str("1815 > 4593".into())),
                ("category_name", RawValue::Str("Áo khoác".into())),
            ]),
            row(&[
                ("product_id", RawValue::Int(2)),
                ("price", RawValue::Int(200)),
                ("category_path", RawValue::Str("1815 > 4593".into())),
            ]),
        ];
        let split = split_batch(&rows);
        assert_eq!(split.categories.len(), 1);
        assert_eq!(split.categories[0].category_id, 4593);
        assert_eq!(split.categories[0].category_name.as_deref(), Some("Áo khoác"));
    }

    #[test]
    fn dimension_timestamps_mirror_observation() {
        let rows = vec![row(&[
            ("product_id", RawValue::Int(1)),
            ("price", RawValue::Int(100)),
            ("_extracted_at", RawValue::Str("2026-01-18T16:49:55Z".into())),
        ])];
        let split = split_batch(&rows);
        let dim = &split.products[0];
        assert_eq!(dim.created_at, dim.updated_at);
        assert!(dim.created_at.is_some());
    }
}
