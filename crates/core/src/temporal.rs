//! Date coercion for temporal fields.
//!
//! Producers send dates in several shapes. Accepted inputs:
//!
//! - numbers: epoch seconds below [`SECONDS_CEILING`], epoch milliseconds above
//! - strings of exactly 13 digits (epoch ms) or 10 digits (epoch seconds)
//! - RFC 3339, with or without an offset (no offset means UTC)
//! - ISO dates (`2014-01-01`) and US dates (`5/12/2015`), both at UTC midnight
//!
//! Anything else is not a date and is left for the caller to keep as-is.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

/// Numbers below this are epoch seconds; at or above, epoch milliseconds.
/// One year expressed in milliseconds.
pub const SECONDS_CEILING: f64 = 31_557_600_000.0;

/// Coerce a raw value into a date, if it has a recognised shape.
pub fn coerce_date(value: &Value) -> Option<OffsetDateTime> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) if (i as f64) < SECONDS_CEILING => from_epoch_seconds(i),
            Some(i) => from_epoch_millis(i),
            None => from_epoch(n.as_f64()?),
        },
        Value::String(s) => parse_date_str(s),
        _ => None,
    }
}

/// Parse a date string in any of the accepted shapes.
pub fn parse_date_str(raw: &str) -> Option<OffsetDateTime> {
    let s = raw.trim();
    if s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.len() {
            13 => from_epoch_millis(s.parse().ok()?),
            10 => from_epoch_seconds(s.parse().ok()?),
            _ => None,
        };
    }

    let parsed = OffsetDateTime::parse(s, &Rfc3339)
        .ok()
        .or_else(|| parse_naive_datetime(s))
        .or_else(|| parse_calendar_date(s));
    if parsed.is_none() {
        debug!(value = raw, "string is not a recognised date");
    }
    parsed
}

fn parse_naive_datetime(s: &str) -> Option<OffsetDateTime> {
    let with_fraction =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    let whole = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let minutes = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    PrimitiveDateTime::parse(s, with_fraction)
        .or_else(|_| PrimitiveDateTime::parse(s, whole))
        .or_else(|_| PrimitiveDateTime::parse(s, minutes))
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

fn parse_calendar_date(s: &str) -> Option<OffsetDateTime> {
    let iso = format_description!("[year]-[month]-[day]");
    let us = format_description!("[month padding:none]/[day padding:none]/[year]");
    Date::parse(s, iso)
        .or_else(|_| Date::parse(s, us))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

fn from_epoch(n: f64) -> Option<OffsetDateTime> {
    if !n.is_finite() {
        return None;
    }
    let nanos = if n < SECONDS_CEILING {
        n * 1_000_000_000.0
    } else {
        n * 1_000_000.0
    };
    OffsetDateTime::from_unix_timestamp_nanos(nanos as i128).ok()
}

fn from_epoch_millis(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

fn from_epoch_seconds(secs: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(secs).ok()
}
