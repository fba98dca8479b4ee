//! Locale-aware numeric parsing.
//!
//! Source listings carry Vietnamese-formatted numbers: "1.5k" and "2,5k"
//! both mean 1500, "1tr"/"1triệu" mean one million, and "10.000" uses "."
//! as a thousands separator. Prices may carry a đ/VND/₫ suffix.

use mart_model::RawValue;
use once_cell::sync::Lazy;
use regex::Regex;

/// Magnitude suffix with optional decimal part, e.g. "1.5k", "2,5 tr".
/// Longer suffixes listed first so "trieu" is not consumed as "tr".
static SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:[.,]\d+)?)\s*(k|trieu|triệu|tr|m)").unwrap());

/// Groups of exactly three digits joined by ".", e.g. "10.000", "1.000.000".
static THOUSANDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}(?:\.\d{3})+").unwrap());

/// Strict thousands-separated price with optional currency suffix.
static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{1,3}(?:\.\d{3})+)(?:\s*(?:đ|vnd|₫))?\s*$").unwrap());

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Parses an accumulated sales-volume value to an integer count.
///
/// Missing or unparseable input degrades to 0. Numeric raw values are
/// truncated toward zero.
pub fn parse_sales_volume(value: Option<&RawValue>) -> i64 {
    match value {
        None => 0,
        Some(raw) => match raw {
            RawValue::Str(text) => parse_sales_volume_text(text),
            other => other.as_i64().unwrap_or(0),
        },
    }
}

/// Text form of [`parse_sales_volume`].
///
/// Suffix notation wins over separator detection: with a suffix present,
/// "." and "," are both decimal separators; without one, a thousands
/// pattern is stripped, and failing that the first digit run is taken.
pub fn parse_sales_volume_text(text: &str) -> i64 {
    let lowered = text.trim().to_lowercase();

    if let Some(caps) = SUFFIX_RE.captures(&lowered) {
        let number: f64 = match caps[1].replace(',', ".").parse() {
            Ok(v) => v,
            Err(_) => return 0,
        };
        let multiplier = match &caps[2] {
            "k" => 1_000.0,
            _ => 1_000_000.0,
        };
        return (number * multiplier) as i64;
    }

    if let Some(m) = THOUSANDS_RE.find(&lowered) {
        return m.as_str().replace('.', "").parse().unwrap_or(0);
    }

    if let Some(m) = DIGITS_RE.find(&lowered) {
        return m.as_str().parse().unwrap_or(0);
    }

    0
}

/// Parses a discount percentage, ignoring sign: "-41%" and "41%" are both 41.
///
/// Missing or unparseable input degrades to 0.
pub fn parse_discount_rate(value: Option<&RawValue>) -> i64 {
    match value {
        None => 0,
        Some(raw) => match raw {
            RawValue::Str(text) => parse_discount_rate_text(text),
            other => other
                .as_i64()
                .and_then(i64::checked_abs)
                .unwrap_or(0),
        },
    }
}

/// Text form of [`parse_discount_rate`]: first digit run in the string.
pub fn parse_discount_rate_text(text: &str) -> i64 {
    DIGITS_RE
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Cleans a price value to an integer amount in the quote currency.
///
/// Unlike the count parsers, an unparseable price is `None`, not 0: a zero
/// price would silently flip the inventory flag.
pub fn clean_price(value: Option<&RawValue>) -> Option<i64> {
    match value? {
        RawValue::Str(text) => clean_price_text(text),
        other => other.as_i64(),
    }
}

/// Text form of [`clean_price`].
///
/// A strict Vietnamese thousands pattern (optionally suffixed with đ/VND/₫)
/// is stripped and parsed directly; anything else loses non-digit and
/// non-dot characters and goes through float coercion.
pub fn clean_price_text(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let lowered = trimmed.to_lowercase();

    if let Some(caps) = PRICE_RE.captures(&lowered) {
        return caps[1].replace('.', "").parse().ok();
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}

/// Parses a trend score to a non-negative integer.
///
/// The trend provider reports "<1" for very low search volume; that and any
/// other unparseable value degrade to 0.
pub fn parse_trend_score(value: Option<&RawValue>) -> i64 {
    let score = match value {
        None => 0,
        Some(raw) => match raw {
            RawValue::Str(text) => parse_trend_score_text(text),
            other => other.as_i64().unwrap_or(0),
        },
    };
    score.max(0)
}

/// Text form of [`parse_trend_score`].
pub fn parse_trend_score_text(text: &str) -> i64 {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "<1" {
        return 0;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
        .max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sales_volume_suffixes() {
        assert_eq!(parse_sales_volume_text("Đã bán 1.5k"), 1500);
        assert_eq!(parse_sales_volume_text("1,5k"), 1500);
        assert_eq!(parse_sales_volume_text("2tr"), 2_000_000);
        assert_eq!(parse_sales_volume_text("1 triệu"), 1_000_000);
        assert_eq!(parse_sales_volume_text("3m"), 3_000_000);
    }

    #[test]
    fn sales_volume_thousands_separator() {
        assert_eq!(parse_sales_volume_text("Đã bán 10.000"), 10_000);
        assert_eq!(parse_sales_volume_text("1.000.000"), 1_000_000);
    }

    #[test]
    fn sales_volume_plain_and_garbage() {
        assert_eq!(parse_sales_volume_text("Đã bán 100"), 100);
        assert_eq!(parse_sales_volume_text("sold out"), 0);
        assert_eq!(parse_sales_volume_text(""), 0);
    }

    #[test]
    fn sales_volume_numeric_coercion() {
        assert_eq!(parse_sales_volume(Some(&RawValue::Int(250))), 250);
        assert_eq!(parse_sales_volume(Some(&RawValue::Float(99.9))), 99);
        assert_eq!(parse_sales_volume(None), 0);
    }

    #[test]
    fn discount_rate_ignores_sign() {
        assert_eq!(parse_discount_rate_text("-41%"), 41);
        assert_eq!(parse_discount_rate_text("41%"), 41);
        assert_eq!(parse_discount_rate_text("-25"), 25);
        assert_eq!(parse_discount_rate(Some(&RawValue::Int(-30))), 30);
        assert_eq!(parse_discount_rate(Some(&RawValue::Float(-12.7))), 12);
        assert_eq!(parse_discount_rate(None), 0);
    }

    #[test]
    fn discount_rate_extreme_integer() {
        assert_eq!(parse_discount_rate(Some(&RawValue::Int(i64::MIN))), 0);
    }

    #[test]
    fn clean_price_thousands_and_currency() {
        assert_eq!(clean_price_text("1.000.000 VND"), Some(1_000_000));
        assert_eq!(clean_price_text("10.000đ"), Some(10_000));
        assert_eq!(clean_price_text("250.000 ₫"), Some(250_000));
    }

    #[test]
    fn clean_price_fallback_and_failures() {
        assert_eq!(clean_price_text("3520000"), Some(3_520_000));
        assert_eq!(clean_price_text("12.5"), Some(12));
        assert_eq!(clean_price_text("free"), None);
        assert_eq!(clean_price_text(""), None);
        assert_eq!(clean_price_text("1.2.3"), None);
    }

    #[test]
    fn clean_price_numeric_inputs() {
        assert_eq!(clean_price(Some(&RawValue::Float(3_520_000.0))), Some(3_520_000));
        assert_eq!(clean_price(Some(&RawValue::Float(f64::NAN))), None);
        assert_eq!(clean_price(Some(&RawValue::Int(990))), Some(990));
        assert_eq!(clean_price(None), None);
    }

    #[test]
    fn trend_score_hardening() {
        assert_eq!(parse_trend_score_text("<1"), 0);
        assert_eq!(parse_trend_score_text("87"), 87);
        assert_eq!(parse_trend_score_text(""), 0);
        assert_eq!(parse_trend_score_text("n/a"), 0);
        assert_eq!(parse_trend_score(Some(&RawValue::Int(-5))), 0);
    }
}
