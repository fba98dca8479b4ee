//! Value parsers for locale-formatted source scalars.
//!
//! Every parser here is total: malformed input degrades to a safe default
//! (0, `None`, or `false`) and never aborts a batch. The volume of degraded
//! values is a data-quality signal, not a pipeline failure.

pub mod datetime;
pub mod numeric;
pub mod url;

pub use datetime::{format_date, format_timestamp, parse_observed_at, parse_snapshot_date};
pub use numeric::{clean_price, parse_discount_rate, parse_sales_volume, parse_trend_score};
pub use url::{extract_category_id, extract_url_key};
