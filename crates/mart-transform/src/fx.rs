//! Exchange-rate row construction.
//!
//! One row per date, built either from a live provider quote or from the
//! configured fallback constant, tagged with its provenance.

use chrono::{DateTime, NaiveDate, Utc};
use mart_model::{ExchangeRate, MartError, PipelineConfig, RateSource};
use tracing::info;

/// Builds a validated exchange-rate row from a provider quote.
///
/// The rate must be finite and positive; anything else is an
/// [`MartError::InvalidRate`] since a zero or negative rate would corrupt
/// every downstream price normalization.
pub fn build_fx_rate(
    rate: f64,
    source: RateSource,
    date: NaiveDate,
    observed_at: DateTime<Utc>,
    config: &PipelineConfig,
) -> Result<ExchangeRate, MartError> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(MartError::InvalidRate { rate });
    }
    Ok(ExchangeRate {
        date,
        from_currency: config.base_currency.clone(),
        to_currency: config.quote_currency.clone(),
        rate,
        source,
        observed_at,
    })
}

/// Builds the fallback exchange-rate row for a date with no live quote.
pub fn fallback_fx_rate(
    date: NaiveDate,
    observed_at: DateTime<Utc>,
    config: &PipelineConfig,
) -> ExchangeRate {
    info!(
        rate = config.fallback_fx_rate,
        %date,
        "no live exchange rate, using fallback"
    );
    ExchangeRate {
        date,
        from_currency: config.base_currency.clone(),
        to_currency: config.quote_currency.clone(),
        rate: config.fallback_fx_rate,
        source: RateSource::Fallback,
        observed_at,
    }
}
