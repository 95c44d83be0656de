use super::{Pipe, PipeError, shape_name};
use crate::value::Value;

/// Uppercases a string.
pub struct UpperCase;

impl UpperCase {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for UpperCase {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for UpperCase {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => Ok(Value::String(s.to_uppercase())),
            other => Err(PipeError::Unsupported {
                pipe: "uppercase",
                got: shape_name(other),
            }),
        }
    }
}

/// Lowercases a string.
pub struct LowerCase;

impl LowerCase {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for LowerCase {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for LowerCase {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => Ok(Value::String(s.to_lowercase())),
            other => Err(PipeError::Unsupported {
                pipe: "lowercase",
                got: shape_name(other),
            }),
        }
    }
}

/// Capitalizes the first letter of each whitespace-delimited word and
/// lowercases the rest. Whitespace is preserved as-is.
pub struct TitleCase;

impl TitleCase {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for TitleCase {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for TitleCase {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => Ok(Value::String(title_case(s))),
            other => Err(PipeError::Unsupported {
                pipe: "titlecase",
                got: shape_name(other),
            }),
        }
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Takes a subsequence of a string (by character) or an array (by element).
///
/// Arguments are `start` and an optional `end`, with JavaScript slice
/// semantics: negative indices count from the end, out-of-range bounds
/// clamp instead of erroring.
pub struct Slice;

impl Slice {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Slice {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for Slice {
    fn apply(&self, value: &Value, args: &[String]) -> Result<Value, PipeError> {
        let start = parse_index(args.first())?.unwrap_or(0);
        let end = parse_index(args.get(1))?;

        match value {
            Value::Null => Ok(Value::Null),
            Value::String(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (from, to) = slice_bounds(chars.len(), start, end);
                Ok(Value::String(chars[from..to].iter().collect()))
            }
            Value::Array(items) => {
                let (from, to) = slice_bounds(items.len(), start, end);
                Ok(Value::Array(items[from..to].to_vec()))
            }
            other => Err(PipeError::Unsupported {
                pipe: "slice",
                got: shape_name(other),
            }),
        }
    }
}

fn parse_index(arg: Option<&String>) -> Result<Option<i64>, PipeError> {
    match arg {
        None => Ok(None),
        Some(text) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PipeError::InvalidArgument {
                pipe: "slice",
                detail: format!("index `{text}`"),
            }),
    }
}

fn slice_bounds(len: usize, start: i64, end: Option<i64>) -> (usize, usize) {
    let from = clamp_index(len, start);
    let to = match end {
        Some(end) => clamp_index(len, end),
        None => len,
    };
    (from, to.max(from))
}

fn clamp_index(len: usize, index: i64) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs() as usize)
    } else {
        (index as usize).min(len)
    }
}
