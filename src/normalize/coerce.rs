//! Scalar coercion helpers: numbers, currency strings, dates.
//!
//! Every helper is total — unparseable input yields `None` and the caller
//! substitutes a documented default instead of propagating a failure.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::Value;

/// Parses a numeric value out of a JSON number or a number-looking string.
///
/// Strings may carry a currency sign and thousands separators
/// (`"$1,200.50"` → `1200.5`).
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned = s.trim().trim_start_matches('$').replace(',', "");
            if cleaned.is_empty() {
                None
            } else {
                cleaned.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

/// Renders an amount as the canonical currency string (`"$49.90"`).
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Parses a number-looking value and renders it as currency.
pub fn coerce_currency(value: &Value) -> Option<String> {
    parse_number(value).map(format_currency)
}

/// Parses a date-looking value and renders canonical RFC 3339.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as
/// midnight UTC). The canonical rendering re-parses to itself, keeping
/// normalization idempotent.
pub fn coerce_date(value: &Value) -> Option<String> {
    let s = value.as_str()?;
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.to_rfc3339_opts(SecondsFormat::Secs, false));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
        return Some(dt.to_rfc3339_opts(SecondsFormat::Secs, false));
    }
    None
}

/// The fallback timestamp used when a date cannot be parsed: now, in the
/// same canonical rendering as [`coerce_date`].
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Forces a value to text; numbers are rendered, other shapes rejected.
pub fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
