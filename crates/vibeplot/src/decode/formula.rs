//! Recognition of spreadsheet-formula literals exported in place of values.
//!
//! Some logging tools write timestamps and fixed-point numbers into CSV cells
//! as formula text (`=TEXT(...)&"."&...`) instead of evaluated values. Only
//! two literal shapes are understood; everything else passes through.

use std::borrow::Cow;

use chrono::{DateTime, Datelike, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

/// `=TEXT(<epoch>/86400 + 25569, "<fmt>") & "." & <suffix>`
static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^=TEXT\(([0-9]+)/86400\s*\+\s*25569\s*,\s*"([^"]+)"\)\s*&\s*"\."\s*&([0-9]+)"#)
        .unwrap()
});

/// `=<int>&"."&TEXT(<frac>,"000...")`
static CONCAT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^=([0-9]+)&"\."&TEXT\(([0-9]+),"0+"\)"#).unwrap());

/// First quoted run of zeros, used as the padding width.
static ZERO_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r#""(0+)""#).unwrap());

// =============================================================================
// PUBLIC API
// =============================================================================

/// Decode a single cell.
///
/// Returns the canonical display string when `cell` matches one of the two
/// known formula shapes, and `cell` unchanged otherwise. Never fails.
///
/// # Example
///
/// ```
/// use vibeplot::decode;
///
/// assert_eq!(decode(r#"=123&"."&TEXT(7,"000000")"#), "123.000007");
/// assert_eq!(decode("=garbage"), "=garbage");
/// assert_eq!(decode("42.5"), "42.5");
/// ```
pub fn decode(cell: &str) -> Cow<'_, str> {
    if !is_formula(cell) {
        return Cow::Borrowed(cell);
    }

    if let Some(decoded) = decode_timestamp(cell) {
        return Cow::Owned(decoded);
    }

    if let Some(decoded) = decode_concat(cell) {
        return Cow::Owned(decoded);
    }

    Cow::Borrowed(cell)
}

/// Decode a JSON cell value. Only strings are inspected; numbers, booleans,
/// nulls, arrays, and objects are returned as-is.
pub fn decode_value(value: Value) -> Value {
    match value {
        Value::String(s) => match decode(&s) {
            Cow::Borrowed(_) => Value::String(s),
            Cow::Owned(decoded) => Value::String(decoded),
        },
        other => other,
    }
}

/// Whether a cell looks like a formula literal at all.
pub fn is_formula(cell: &str) -> bool {
    cell.starts_with('=')
}

// =============================================================================
// TIMESTAMP PATTERN
// =============================================================================

fn decode_timestamp(cell: &str) -> Option<String> {
    let caps = TIMESTAMP_PATTERN.captures(cell)?;

    // Out-of-range epochs leave the cell untouched.
    let seconds: i64 = caps[1].parse().ok()?;
    let timestamp = DateTime::from_timestamp(seconds, 0)?;

    let formatted = format_timestamp(&timestamp, &caps[2]);
    Some(format!("{}.{}", formatted, &caps[3]))
}

/// Date/time tokens recognized inside a spreadsheet format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatToken {
    WeekdayAbbrev,
    Day,
    MonthAbbrev,
    Year,
    Hour,
    /// `mm`: minute or month depending on its neighbours.
    MinuteOrMonth,
    Second,
    Literal(char),
}

/// Tokens in match priority order; longer tokens shadow their prefixes.
const TOKENS: &[(&str, FormatToken)] = &[
    ("ddd", FormatToken::WeekdayAbbrev),
    ("dd", FormatToken::Day),
    ("mmm", FormatToken::MonthAbbrev),
    ("yyyy", FormatToken::Year),
    ("hh", FormatToken::Hour),
    ("mm", FormatToken::MinuteOrMonth),
    ("ss", FormatToken::Second),
];

fn tokenize(format: &str) -> Vec<FormatToken> {
    let mut tokens = Vec::new();
    let mut rest = format;

    'outer: while let Some(ch) = rest.chars().next() {
        for (pattern, token) in TOKENS {
            if let Some(tail) = rest.strip_prefix(pattern) {
                tokens.push(*token);
                rest = tail;
                continue 'outer;
            }
        }
        tokens.push(FormatToken::Literal(ch));
        rest = &rest[ch.len_utf8()..];
    }

    tokens
}

/// `mm` is a minute when the nearest token before it is `hh` or the nearest
/// token after it is `ss`; otherwise it is a month.
fn is_minute(tokens: &[FormatToken], index: usize) -> bool {
    let is_field = |t: &&FormatToken| !matches!(t, FormatToken::Literal(_));

    let previous = tokens[..index].iter().rev().find(is_field);
    let next = tokens[index + 1..].iter().find(is_field);

    previous == Some(&FormatToken::Hour) || next == Some(&FormatToken::Second)
}

fn format_timestamp(timestamp: &DateTime<Utc>, format: &str) -> String {
    let tokens = tokenize(format);
    let mut out = String::with_capacity(format.len() + 8);

    for (index, token) in tokens.iter().enumerate() {
        let piece = match token {
            FormatToken::WeekdayAbbrev => timestamp.format("%a").to_string(),
            FormatToken::Day => format!("{:02}", timestamp.day()),
            FormatToken::MonthAbbrev => timestamp.format("%b").to_string(),
            FormatToken::Year => timestamp.format("%Y").to_string(),
            FormatToken::Hour => format!("{:02}", timestamp.hour()),
            FormatToken::MinuteOrMonth if is_minute(&tokens, index) => {
                format!("{:02}", timestamp.minute())
            }
            FormatToken::MinuteOrMonth => format!("{:02}", timestamp.month()),
            FormatToken::Second => format!("{:02}", timestamp.second()),
            FormatToken::Literal(ch) => {
                out.push(*ch);
                continue;
            }
        };
        out.push_str(&piece);
    }

    out
}

// =============================================================================
// ZERO-PADDED CONCATENATION PATTERN
// =============================================================================

fn decode_concat(cell: &str) -> Option<String> {
    let caps = CONCAT_PATTERN.captures(cell)?;
    let whole = &caps[1];
    let fraction = &caps[2];

    let width = ZERO_RUN
        .captures(cell)
        .map(|zeros| zeros[1].len())
        .unwrap_or(fraction.len());

    let pad = width.saturating_sub(fraction.len());
    let mut out = String::with_capacity(whole.len() + 1 + pad + fraction.len());
    out.push_str(whole);
    out.push('.');
    out.extend(std::iter::repeat_n('0', pad));
    out.push_str(fraction);
    Some(out)
}
