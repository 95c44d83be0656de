//! Named transforms applied to a resolved value.
//!
//! Each transform is registered under the name used in cell expressions
//! (`doc.id | ulidToDate | timeago`). The register is populated once at
//! startup and only read afterwards; implementations are `Sync` so one
//! evaluator can serve concurrent rendering contexts without locking.

mod number;
mod structure;
mod text;
mod time;

pub use number::{Currency, NumberFormat, Percent, Sum};
pub use structure::{Json, KeyValue};
pub use text::{LowerCase, Slice, TitleCase, UpperCase};
pub use time::{DateFormat, TimeAgo, UlidToDate};

use std::collections::HashMap;

use crate::value::Value;

/// A named transform: one value in, one value out, plus the invocation's
/// literal string arguments.
///
/// Implementations report faults as [`PipeError`] values instead of
/// panicking; the evaluator converts a fault into a pass-through of the
/// pre-invocation value.
pub trait Pipe {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError>;
}

/// Fault raised inside a transform.
///
/// Never escapes evaluation — the chain keeps the running value and moves
/// on to the next stage.
#[derive(Debug, Clone)]
pub enum PipeError {
    /// The transform does not accept the shape of its input value
    Unsupported {
        pipe: &'static str,
        got: &'static str,
    },

    /// A literal argument could not be interpreted
    InvalidArgument { pipe: &'static str, detail: String },
}

impl std::fmt::Display for PipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipeError::Unsupported { pipe, got } => {
                write!(f, "pipe `{}` does not accept {} values", pipe, got)
            }
            PipeError::InvalidArgument { pipe, detail } => {
                write!(f, "pipe `{}` given an invalid argument: {}", pipe, detail)
            }
        }
    }
}

impl std::error::Error for PipeError {}

/// Registry mapping transform names to implementations.
pub type PipeRegister = HashMap<String, Box<dyn Pipe + Sync>>;

/// Returns a human-readable shape name for a Value
pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Boolean(_) => "boolean",
        Value::Integer(_) => "integer",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        Value::Timestamp(_) => "timestamp",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The standard transform set, registered under the names cell expressions
/// use.
pub fn standard_pipes() -> PipeRegister {
    let mut register: PipeRegister = HashMap::new();
    register.insert("date".to_string(), Box::new(DateFormat::new()));
    register.insert("keyvalue".to_string(), Box::new(KeyValue::new()));
    register.insert("slice".to_string(), Box::new(Slice::new()));
    register.insert("json".to_string(), Box::new(Json::new()));
    register.insert("uppercase".to_string(), Box::new(UpperCase::new()));
    register.insert("lowercase".to_string(), Box::new(LowerCase::new()));
    register.insert("titlecase".to_string(), Box::new(TitleCase::new()));
    register.insert("currency".to_string(), Box::new(Currency::new()));
    register.insert("number".to_string(), Box::new(NumberFormat::new()));
    register.insert("percent".to_string(), Box::new(Percent::new()));
    register.insert("timeago".to_string(), Box::new(TimeAgo::new()));
    register.insert("ulidToDate".to_string(), Box::new(UlidToDate::new()));
    register.insert("sum".to_string(), Box::new(Sum::new()));
    register
}
