//! First-match-wins field resolution over loosely shaped JSON records.
//!
//! # Responsibility
//! - Resolve one canonical field from an ordered list of historical names.
//! - Coerce legacy scalar encodings (numeric strings, epoch numbers) into
//!   canonical values.
//!
//! # Invariants
//! - Resolution never fails; an unresolved field yields `None`/`false`.
//! - A candidate matches only when it is present and truthy: not null,
//!   `false`, zero or blank.
//! - Dotted paths (`financials.totalBudget`) walk nested objects.

use crate::model::timestamp::epoch_ms_to_iso;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

pub(crate) type Record = Map<String, Value>;

static NUMERIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid numeric prefix regex")
});
static MAGNITUDE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(k|thousand|mm|m|mil|million|bn|b|billion)\b")
        .expect("valid magnitude suffix regex")
});

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Looks up `path` in `record`, walking nested objects on `.`.
pub(crate) fn lookup<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Returns the first candidate that is not `null`, `false`, zero or a blank
/// string.
pub(crate) fn first_present<'a>(record: &'a Record, paths: &[&str]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find(|value| match value {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.trim().is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
}

/// Resolves a text field. Numbers are rendered as text; other shapes are
/// skipped.
pub(crate) fn first_text(record: &Record, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(scalar_text)
}

/// Resolves a date field: strings pass through, numbers are read as epoch
/// milliseconds.
pub(crate) fn first_date(record: &Record, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|value| match value {
            Value::String(text) => non_blank(text),
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(|float| float as i64))
                .and_then(epoch_ms_to_iso),
            _ => None,
        })
}

/// Resolves a monetary or ratio field.
///
/// A candidate that does not parse, is not finite, or is exactly zero falls
/// through to the next one, so a zero amount reads as "not provided".
pub(crate) fn first_amount(record: &Record, paths: &[&str]) -> Option<f64> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|value| {
            let amount = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => parse_amount(text),
                _ => None,
            }?;
            (amount.is_finite() && amount != 0.0).then_some(amount)
        })
}

/// Resolves a numeric field with the amount rules, keeping an explicit zero.
pub(crate) fn first_number(record: &Record, paths: &[&str]) -> Option<f64> {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .find_map(|value| {
            let amount = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => parse_amount(text),
                _ => None,
            }?;
            amount.is_finite().then_some(amount)
        })
}

/// Returns `true` when any candidate is truthy.
pub(crate) fn any_truthy(record: &Record, paths: &[&str]) -> bool {
    paths
        .iter()
        .filter_map(|path| lookup(record, path))
        .any(is_truthy)
}

/// Resolves a stable id, generating a UUID v4 when none is present.
pub(crate) fn resolve_id(record: &Record, paths: &[&str]) -> String {
    first_text(record, paths).unwrap_or_else(generate_id)
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a legacy amount string.
///
/// Accepts an optional leading currency symbol, thousands separators and a
/// magnitude suffix (`k`, `m`, `b` and spelled-out forms). Trailing text
/// after the numeric prefix is ignored, matching `parseFloat`.
pub(crate) fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let cleaned = unsigned
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim_start()
        .replace(',', "");

    let prefix = NUMERIC_PREFIX_RE.find(&cleaned)?;
    let mut amount: f64 = prefix.as_str().parse().ok()?;

    let remainder = cleaned[prefix.end()..].trim_start();
    if let Some(suffix) = MAGNITUDE_SUFFIX_RE.find(remainder) {
        amount *= match suffix.as_str().to_ascii_lowercase().as_str() {
            "k" | "thousand" => 1e3,
            "m" | "mm" | "mil" | "million" => 1e6,
            _ => 1e9,
        };
    }

    Some(if negative { -amount } else { amount })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => non_blank(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Value::Array(_) | Value::Object(_) => true,
    }
}
