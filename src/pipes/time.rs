use std::fmt::Write as _;

use chrono::{DateTime, TimeZone, Utc};

use super::{Pipe, PipeError, shape_name};
use crate::value::Value;

// Unit thresholds in seconds, walked in descending order; the first unit
// with a positive count wins.
const INTERVALS: [(&str, i64); 7] = [
    ("y", 31_536_000),
    ("mo", 2_592_000),
    ("w", 604_800),
    ("d", 86_400),
    ("h", 3_600),
    ("m", 60),
    ("s", 1),
];

/// Formats a timestamp as a compact "time since" string: `"5m"`, `"3d"`,
/// `"1y"`.
///
/// Accepts a native timestamp, a numeric epoch in milliseconds, or a
/// parseable date string. Falsy input, unparseable dates and future
/// timestamps all format as the empty string.
pub struct TimeAgo;

impl TimeAgo {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TimeAgo {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for TimeAgo {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        if !value.is_truthy() {
            return Ok(Value::String(String::new()));
        }
        let Some(date) = value.as_timestamp() else {
            return Ok(Value::String(String::new()));
        };

        let seconds = (Utc::now() - date).num_seconds();
        for (unit, threshold) in INTERVALS {
            // div_euclid floors, so future dates stay non-positive at every
            // threshold and fall through to the empty string.
            let count = seconds.div_euclid(threshold);
            if count > 0 {
                return Ok(Value::String(format!("{count}{unit}")));
            }
        }
        Ok(Value::String(String::new()))
    }
}

const BASE32_ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Decodes the timestamp prefix of a ULID into a timestamp value.
///
/// The ten leading characters are a base-32 big-endian integer of epoch
/// milliseconds in the Crockford alphabet (case-sensitive; I, L, O and U
/// are excluded). Null or empty input, input shorter than ten characters,
/// and any character outside the alphabet decode to null — distinguishable
/// from a valid epoch-zero timestamp.
pub struct UlidToDate;

impl UlidToDate {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for UlidToDate {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for UlidToDate {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        let ulid = match value {
            Value::Null => return Ok(Value::Null),
            Value::String(s) => s,
            other => {
                return Err(PipeError::Unsupported {
                    pipe: "ulidToDate",
                    got: shape_name(other),
                });
            }
        };
        if ulid.chars().count() < 10 {
            return Ok(Value::Null);
        }

        let mut timestamp: i64 = 0;
        for ch in ulid.chars().take(10) {
            match BASE32_ALPHABET.find(ch) {
                Some(digit) => timestamp = timestamp * 32 + digit as i64,
                None => return Ok(Value::Null),
            }
        }

        Ok(Utc
            .timestamp_millis_opt(timestamp)
            .single()
            .map(Value::Timestamp)
            .unwrap_or(Value::Null))
    }
}

/// Formats a timestamp-like value as a date string.
///
/// The optional first argument selects a named layout (`short`, `medium`,
/// `shortDate`, `mediumDate`, `shortTime`, `mediumTime`) or supplies a
/// chrono format string directly. Defaults to `mediumDate`.
pub struct DateFormat;

impl DateFormat {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for DateFormat {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError> {
        if matches!(value, Value::Null) {
            return Ok(Value::Null);
        }
        let Some(date) = value.as_timestamp() else {
            return Err(PipeError::Unsupported {
                pipe: "date",
                got: shape_name(value),
            });
        };
        let layout = args.first().map(String::as_str).unwrap_or("mediumDate");
        format_date(&date, layout).map(Value::String)
    }
}

fn format_date(date: &DateTime<Utc>, layout: &str) -> Result<String, PipeError> {
    let pattern = match layout {
        "short" => "%-m/%-d/%y, %-I:%M %p",
        "medium" => "%b %-d, %Y, %-I:%M:%S %p",
        "shortDate" => "%-m/%-d/%y",
        "mediumDate" => "%b %-d, %Y",
        "shortTime" => "%-I:%M %p",
        "mediumTime" => "%-I:%M:%S %p",
        custom => custom,
    };

    // A malformed custom pattern surfaces as a fmt error; report it as a
    // fault rather than letting Display::to_string panic.
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => Ok(out),
        Err(_) => Err(PipeError::InvalidArgument {
            pipe: "date",
            detail: format!("unusable format `{layout}`"),
        }),
    }
}
