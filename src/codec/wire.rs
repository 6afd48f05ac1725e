//! String encodings used on the streams: list literals of numbers and of timestamps.
//!
//! Upstream producers write lists either as JSON or as Python literals, so element
//! quotes may be single or double and missing values may appear as `null` or `None`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// Tokens standing for a missing value, read as `0.0`
const NULL_TOKENS: [&str; 4] = ["null", "None", "NaN", "nan"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("expected a bracketed list, got {0:?}")]
    NotAList(String),
    #[error("invalid number {token:?} at position {position}")]
    InvalidNumber { position: usize, token: String },
    #[error("invalid timestamp {token:?} at position {position}")]
    InvalidTimestamp { position: usize, token: String },
    #[error("invalid decimal {0:?}")]
    InvalidScalar(String),
}

/// Split a list literal into trimmed element tokens
fn list_items(raw: &str) -> Result<Vec<&str>, WireError> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| WireError::NotAList(raw.to_string()))?
        .trim();

    if inner.is_empty() {
        return Ok(Vec::new());
    }
    // one trailing comma is allowed after at least one element, as in `[1.0, 2.0,]`
    let inner = match inner.strip_suffix(',').map(str::trim_end) {
        Some("") => return Err(WireError::NotAList(raw.to_string())),
        Some(rest) => rest,
        None => inner,
    };
    Ok(inner.split(',').map(str::trim).collect())
}

pub fn parse_number_list(raw: &str) -> Result<Vec<f64>, WireError> {
    list_items(raw)?
        .into_iter()
        .enumerate()
        .map(|(position, token)| {
            if NULL_TOKENS.contains(&token) {
                return Ok(0.0);
            }
            token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| WireError::InvalidNumber {
                    position,
                    token: token.to_string(),
                })
        })
        .collect()
}

pub fn parse_timestamp_list(raw: &str) -> Result<Vec<DateTime<Utc>>, WireError> {
    list_items(raw)?
        .into_iter()
        .enumerate()
        .map(|(position, token)| {
            let unquoted = token
                .strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .or_else(|| token.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')))
                .unwrap_or(token);
            parse_timestamp(unquoted).ok_or_else(|| WireError::InvalidTimestamp {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// ISO 8601 timestamp, offset-less values are taken as UTC
pub fn parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(token) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(ts) = DateTime::parse_from_str(token, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(token, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

pub fn parse_scalar(raw: &str) -> Result<f64, WireError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WireError::InvalidScalar(raw.to_string()))
}

/// ISO 8601 with an explicit `+00:00` offset
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

pub fn encode_number_list(values: &[f64]) -> Result<String, serde_json::Error> {
    serde_json::to_string(values)
}

pub fn encode_timestamp_list(timestamps: &[DateTime<Utc>]) -> Result<String, serde_json::Error> {
    let formatted: Vec<String> = timestamps.iter().map(format_timestamp).collect();
    serde_json::to_string(&formatted)
}
