//! DataFrame construction from typed entity rows.
//!
//! Frames carry dates and timestamps as ISO-8601 strings; the typed row is
//! the source of truth and formatting happens only here, at the boundary.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use mart_model::{
    CategoryDimension, ExchangeRate, ProductDimension, ProductSnapshot, TrendObservation,
};

use crate::normalization::datetime::{format_date, format_timestamp};

/// Builds the daily fact frame from validated snapshot rows.
pub fn fact_frame(rows: &[ProductSnapshot]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            "snapshot_date".into(),
            rows.iter()
                .map(|r| r.snapshot_date.map(format_date))
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "product_id".into(),
            rows.iter().map(|r| r.product_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "current_price".into(),
            rows.iter().map(|r| r.current_price).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "original_price".into(),
            rows.iter().map(|r| r.original_price).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "discount_rate".into(),
            rows.iter().map(|r| r.discount_rate).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "sales_volume_acc".into(),
            rows.iter().map(|r| r.sales_volume_acc).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "review_count".into(),
            rows.iter().map(|r| r.review_count).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "rating_average".into(),
            rows.iter().map(|r| r.rating_average).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "inventory_status".into(),
            rows.iter().map(|r| r.inventory_status).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "feature_flag".into(),
            rows.iter().map(|r| r.feature_flag).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "observed_at".into(),
            rows.iter()
                .map(|r| r.observed_at.map(format_timestamp))
                .collect::<Vec<_>>(),
        )
        .into(),
    ];
    DataFrame::new(columns).context("build fact frame")
}

/// Builds the product dimension frame.
pub fn dim_products_frame(rows: &[ProductDimension]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            "product_id".into(),
            rows.iter().map(|r| r.product_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "sku".into(),
            rows.iter().map(|r| r.sku.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "name".into(),
            rows.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "brand_name".into(),
            rows.iter().map(|r| r.brand_name.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "image_url".into(),
            rows.iter().map(|r| r.image_url.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "product_url".into(),
            rows.iter().map(|r| r.product_url.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "seller_id".into(),
            rows.iter().map(|r| r.seller_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "seller_name".into(),
            rows.iter().map(|r| r.seller_name.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "seller_logo".into(),
            rows.iter().map(|r| r.seller_logo.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "category_id".into(),
            rows.iter().map(|r| r.category_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "root_category_id".into(),
            rows.iter().map(|r| r.root_category_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "category_depth".into(),
            rows.iter().map(|r| r.category_depth).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "created_at".into(),
            rows.iter()
                .map(|r| r.created_at.map(format_timestamp))
                .collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "updated_at".into(),
            rows.iter()
                .map(|r| r.updated_at.map(format_timestamp))
                .collect::<Vec<_>>(),
        )
        .into(),
    ];
    DataFrame::new(columns).context("build product dimension frame")
}

/// Builds the category dimension frame.
pub fn dim_categories_frame(rows: &[CategoryDimension]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            "category_id".into(),
            rows.iter().map(|r| r.category_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "category_name".into(),
            rows.iter().map(|r| r.category_name.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "category_level".into(),
            rows.iter().map(|r| r.category_level).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "full_path".into(),
            rows.iter().map(|r| r.full_path.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "url_key".into(),
            rows.iter().map(|r| r.url_key.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "parent_id".into(),
            rows.iter().map(|r| r.parent_id).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "standard_category".into(),
            rows.iter()
                .map(|r| r.standard_category.clone())
                .collect::<Vec<_>>(),
        )
        .into(),
    ];
    DataFrame::new(columns).context("build category dimension frame")
}

/// Builds the long-format trend fact frame.
pub fn trends_frame(rows: &[TrendObservation]) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new(
            "date".into(),
            rows.iter().map(|r| format_date(r.date)).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "keyword".into(),
            rows.iter().map(|r| r.keyword.clone()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "score".into(),
            rows.iter().map(|r| r.score).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "is_partial".into(),
            rows.iter().map(|r| r.is_partial).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "observed_at".into(),
            rows.iter()
                .map(|r| format_timestamp(r.observed_at))
                .collect::<Vec<_>>(),
        )
        .into(),
    ];
    DataFrame::new(columns).context("build trends frame")
}

/// Builds the single-row exchange-rate frame.
pub fn fx_frame(rate: &ExchangeRate) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new("date".into(), vec![format_date(rate.date)]).into(),
        Series::new("from_currency".into(), vec![rate.from_currency.clone()]).into(),
        Series::new("to_currency".into(), vec![rate.to_currency.clone()]).into(),
        Series::new("rate".into(), vec![rate.rate]).into(),
        Series::new("source".into(), vec![rate.source.as_str().to_string()]).into(),
        Series::new(
            "observed_at".into(),
            vec![format_timestamp(rate.observed_at)],
        )
        .into(),
    ];
    DataFrame::new(columns).context("build exchange-rate frame")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use mart_model::RateSource;

    #[test]
    fn empty_fact_frame_keeps_schema() {
        let df = fact_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), mart_model::FACT_SNAPSHOT_SCHEMA.len());
    }

    #[test]
    fn fx_frame_is_single_row() {
        let rate = ExchangeRate {
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            from_currency: "USD".into(),
            to_currency: "VND".into(),
            rate: 25_432.5,
            source: RateSource::Fallback,
            observed_at: Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap(),
        };
        let df = fx_frame(&rate).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), mart_model::DIM_EXCHANGE_RATE_SCHEMA.len());
    }
}
