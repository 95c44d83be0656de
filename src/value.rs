use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A document value used throughout the cell expression engine.
///
/// This type represents all valid JSON types with a distinction between
/// integers and floats, plus a dedicated timestamp variant for date-valued
/// leaves (the `ulidToDate` pipe produces one, `timeago` and `date` consume
/// one).
///
/// # Examples
///
/// ```
/// use cellpipe::Value;
/// use std::collections::HashMap;
///
/// // Scalar values
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let float = Value::Float(3.14);
/// let string = Value::String("hello".to_string());
///
/// // Collections
/// let array = Value::Array(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let mut obj = HashMap::new();
/// obj.insert("key".to_string(), Value::String("value".to_string()));
/// let object = Value::Object(obj);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null (also stands in for absent properties)
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Floating-point number
    Float(f64),

    /// Integer number (preserved separately from floats)
    Integer(i64),

    /// UTF-8 string
    String(String),

    /// A point in time, millisecond precision
    Timestamp(DateTime<Utc>),

    /// Array of values (homogeneous or heterogeneous)
    Array(Vec<Value>),

    /// Object with string keys and value values
    Object(HashMap<String, Value>),
}

impl Value {
    /// Check if the value is truthy (for falsy-input short circuits)
    pub fn is_truthy(&self) -> bool {
        use Value::*;
        match self {
            Null => false,
            Boolean(b) => *b,
            Float(n) => *n != 0.0 && !n.is_nan(),
            Integer(n) => *n != 0,
            String(s) => !s.is_empty(),
            Timestamp(_) => true,
            Array(arr) => !arr.is_empty(),
            Object(obj) => !obj.is_empty(),
        }
    }

    /// Loose numeric coercion: strings parse or contribute zero, booleans
    /// are 0/1, timestamps are epoch milliseconds, everything else is zero.
    /// NaN collapses to zero so sums stay finite.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Integer(n) => *n as f64,
            Value::Float(n) => {
                if n.is_nan() {
                    0.0
                } else {
                    *n
                }
            }
            Value::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(0.0)
                }
            }
            Value::Timestamp(ts) => ts.timestamp_millis() as f64,
            _ => 0.0,
        }
    }

    /// Get as string (display coercion)
    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Timestamp(ts) => ts.to_rfc3339(),
            Value::Null => "null".to_string(),
            _ => format!("{:?}", self),
        }
    }

    /// Coerce to a point in time: native timestamps pass through, numbers
    /// are epoch milliseconds, strings parse as RFC 3339 or a plain
    /// date/datetime.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            Value::Integer(ms) => Utc.timestamp_millis_opt(*ms).single(),
            Value::Float(ms) => Utc.timestamp_millis_opt(*ms as i64).single(),
            Value::String(s) => parse_date_string(s),
            _ => None,
        }
    }
}

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    None
}
