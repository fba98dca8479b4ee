//! Immutable pipeline configuration.
//!
//! One `PipelineConfig` is built at startup and passed by reference into
//! every component. There is no mutable global state.

use std::path::PathBuf;

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root of the raw zone (date-partitioned source files).
    pub raw_zone_root: PathBuf,
    /// Root of the clean zone (transformed Parquet output).
    pub clean_zone_root: PathBuf,
    /// Badge tag that sets the product feature flag (case-insensitive).
    pub feature_tag: String,
    /// Base currency of the exchange-rate feed.
    pub base_currency: String,
    /// Quote currency of the exchange-rate feed.
    pub quote_currency: String,
    /// Rate used when no live exchange rate is available for a date.
    pub fallback_fx_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            raw_zone_root: PathBuf::from("raw_zone"),
            clean_zone_root: PathBuf::from("clean_zone"),
            feature_tag: "express".to_string(),
            base_currency: "USD".to_string(),
            quote_currency: "VND".to_string(),
            fallback_fx_rate: 25_400.0,
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_raw_zone_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.raw_zone_root = root.into();
        self
    }

    #[must_use]
    pub fn with_clean_zone_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.clean_zone_root = root.into();
        self
    }

    #[must_use]
    pub fn with_feature_tag(mut self, tag: impl Into<String>) -> Self {
        self.feature_tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_fallback_fx_rate(mut self, rate: f64) -> Self {
        self.fallback_fx_rate = rate;
        self
    }
}
