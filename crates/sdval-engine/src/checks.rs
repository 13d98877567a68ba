//! # Type Checker Primitives
//!
//! Stateless predicates over JSON values, used by the `required` and
//! `recommended` combinators and directly by rule-sets.
//!
//! | Check           | Accepts                                                        |
//! |-----------------|----------------------------------------------------------------|
//! | `string`        | strings                                                        |
//! | `object`        | objects (not arrays)                                           |
//! | `array`         | arrays                                                         |
//! | `arrayOrObject` | arrays and objects                                             |
//! | `number`        | numbers, and strings that parse as finite numbers              |
//! | `date`          | numbers (epoch millis) and strings that parse as a date/time   |
//! | `url`           | absolute or relative URLs, or a list of them; never `data:`    |
//! | `currency`      | three uppercase ASCII letters                                  |
//! | `enum`          | one of the listed strings                                      |
//! | `regex`         | strings (or numbers) matching the pattern                      |
//! | `duration`      | ISO-8601 durations such as `PT1H30M` or `P3D`                  |
//!
//! Unknown check names resolve to [`Check::Any`], which accepts everything.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;
use url::Url;

/// Base used to resolve relative URLs.
const URL_BASE: &str = "https://example.com/";

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^P(\d+Y)?(\d+M)?(\d+D)?(T(\d+H)?(\d+M)?(\d+S)?)?$")
        .expect("duration pattern is valid")
});

/// A type constraint applied to a present field value.
#[derive(Debug, Clone, Default)]
pub enum Check {
    /// No constraint.
    #[default]
    Any,
    /// `string`
    String,
    /// `object`
    Object,
    /// `array`
    Array,
    /// `arrayOrObject`
    ArrayOrObject,
    /// `number`
    Number,
    /// `date`
    Date,
    /// `url`
    Url,
    /// `currency`
    Currency,
    /// `enum`: membership in the listed values.
    Enum(Vec<String>),
    /// `regex`: pattern match.
    Regex(Regex),
    /// `duration`
    Duration,
}

impl Check {
    /// Resolve a check by its wire name.
    ///
    /// `args` are the allowed values for `enum` and the pattern (first
    /// element) for `regex`. Unknown names, and a `regex` whose pattern
    /// does not compile, yield [`Check::Any`].
    pub fn named(name: &str, args: &[&str]) -> Self {
        match name {
            "string" => Self::String,
            "object" => Self::Object,
            "array" => Self::Array,
            "arrayOrObject" => Self::ArrayOrObject,
            "number" => Self::Number,
            "date" => Self::Date,
            "url" => Self::Url,
            "currency" => Self::Currency,
            "enum" => Self::Enum(args.iter().map(|a| a.to_string()).collect()),
            "regex" => match args.first().map(|pattern| Regex::new(pattern)) {
                Some(Ok(regex)) => Self::Regex(regex),
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "invalid regex check pattern; accepting any value");
                    Self::Any
                }
                None => Self::Any,
            },
            "duration" => Self::Duration,
            other => {
                tracing::trace!(check = other, "unknown check name; accepting any value");
                Self::Any
            }
        }
    }

    /// Enum check over string literals.
    pub fn one_of(allowed: &[&str]) -> Self {
        Self::Enum(allowed.iter().map(|a| a.to_string()).collect())
    }

    /// Returns true if `value` satisfies this check.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Object => is_object(value),
            Self::Array => value.is_array(),
            Self::ArrayOrObject => is_array_or_object(value),
            Self::Number => is_number(value),
            Self::Date => is_date(value),
            Self::Url => is_url(value),
            Self::Currency => is_currency(value),
            Self::Enum(allowed) => is_one_of(value, allowed),
            Self::Regex(regex) => matches_pattern(value, regex),
            Self::Duration => is_duration(value),
        }
    }
}

/// Objects, excluding arrays and null.
pub fn is_object(value: &Value) -> bool {
    value.is_object()
}

/// Arrays or objects.
pub fn is_array_or_object(value: &Value) -> bool {
    value.is_array() || value.is_object()
}

/// Numbers, and strings that parse as finite numbers.
pub fn is_number(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => parse_number(s).is_some_and(f64::is_finite),
        _ => false,
    }
}

/// Numeric reading of a value: numbers as-is, numeric strings parsed
/// (blank strings read as zero), booleans as 1/0, null as zero.
///
/// Returns `None` for values with no numeric reading.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parse a numeric string: decimal and exponent notation, `0x`/`0o`/`0b`
/// integer literals, and signed `Infinity`. Surrounding whitespace is
/// ignored and a blank string reads as zero.
fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|n| n as f64);
        }
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // `f64::from_str` also accepts "inf"/"nan" spellings, which are not numbers here.
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Numbers (epoch milliseconds) and strings that parse as a calendar date
/// or date-time.
pub fn is_date(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|ms| ms.abs() <= 8.64e15),
        Value::String(s) => parses_as_date(s.trim()),
        _ => false,
    }
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

fn parses_as_date(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    // `2025-07-21T19:00Z` has no seconds, which RFC 3339 requires.
    let zulu = s.strip_suffix('Z').map(|head| format!("{head}+00:00"));
    let offset_input = zulu.as_deref().unwrap_or(s);
    if OFFSET_FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(offset_input, fmt).is_ok())
    {
        return true;
    }

    if NAIVE_DATE_TIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }

    // Year-month and bare year.
    if s.len() == 7 && NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").is_ok() {
        return true;
    }
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// A URL resolvable against a base (absolute or relative), or a list of
/// such URLs. `data:` URLs are always rejected.
pub fn is_url(value: &Value) -> bool {
    match value {
        Value::String(s) => is_url_str(s),
        Value::Array(items) => items
            .iter()
            .all(|item| item.as_str().is_some_and(is_url_str)),
        _ => false,
    }
}

fn is_url_str(s: &str) -> bool {
    if s.starts_with("data:") {
        return false;
    }
    Url::parse(URL_BASE).and_then(|base| base.join(s)).is_ok()
}

/// Exactly three uppercase ASCII letters (ISO 4217 shape).
pub fn is_currency(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.len() == 3 && s.bytes().all(|b| b.is_ascii_uppercase()))
}

/// Membership of a string value in `allowed`.
pub fn is_one_of(value: &Value, allowed: &[String]) -> bool {
    value.as_str().is_some_and(|s| allowed.iter().any(|a| a == s))
}

/// Strings (and numbers, via their JSON text) matching `regex`.
pub fn matches_pattern(value: &Value, regex: &Regex) -> bool {
    match value {
        Value::String(s) => regex.is_match(s),
        Value::Number(n) => regex.is_match(&n.to_string()),
        _ => false,
    }
}

/// ISO-8601 duration with at least one designator, e.g. `PT15M`, `P1Y2M`.
pub fn is_duration(value: &Value) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let Some(rest) = s.strip_prefix('P') else {
        return false;
    };
    let designated = match rest.as_bytes() {
        [first, ..] if first.is_ascii_digit() => true,
        [b'T', second, ..] => second.is_ascii_digit(),
        _ => false,
    };
    designated && DURATION.is_match(s)
}
