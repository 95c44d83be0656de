//! Path resolution against a nested document.
//!
//! Resolution is deterministic, side-effect free, and never errors: every
//! failure shape (missing property, null intermediate, index or wildcard
//! over a non-array) degrades to `Value::Null` for the branch in question.

use crate::ast::{Qualifier, Segment};
use crate::value::Value;

/// Resolve a parsed path against a document.
///
/// Segments are processed left to right, threading the current value and
/// the remaining segments:
///
/// - a null current value, or no remaining segments, terminates resolution
///   with the current value;
/// - a qualified segment (`name[3]`, `name[*]`) looks up `name` and
///   requires an array there — anything else resolves to null for the
///   branch. An index descends into that element (out of bounds is null); a
///   wildcard maps every element through the remaining path, so the result
///   array always has the source array's length, with unresolved elements
///   held as null rather than dropped;
/// - a plain segment descends into the property lookup, which is null for
///   missing keys and for lookups on non-objects.
///
/// # Examples
///
/// ```
/// use cellpipe::{parse_expression, resolve, Value};
/// use std::collections::HashMap;
///
/// let mut doc = HashMap::new();
/// doc.insert("title".to_string(), Value::String("HelloWorld".to_string()));
/// let doc = Value::Object(doc);
///
/// let accessor = parse_expression("title");
/// assert_eq!(
///     resolve(&doc, &accessor.segments),
///     Value::String("HelloWorld".to_string()),
/// );
/// ```
pub fn resolve(value: &Value, segments: &[Segment]) -> Value {
    if matches!(value, Value::Null) {
        return Value::Null;
    }
    let Some((head, rest)) = segments.split_first() else {
        return value.clone();
    };

    match &head.qualifier {
        Some(qualifier) => match lookup(value, &head.name) {
            Some(Value::Array(items)) => match qualifier {
                Qualifier::Index(index) => match items.get(*index) {
                    Some(item) => resolve(item, rest),
                    None => Value::Null,
                },
                Qualifier::Wildcard => {
                    Value::Array(items.iter().map(|item| resolve(item, rest)).collect())
                }
            },
            // Qualifier over a non-array never traverses further.
            _ => Value::Null,
        },
        None => match lookup(value, &head.name) {
            Some(next) => resolve(next, rest),
            None => Value::Null,
        },
    }
}

fn lookup<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        _ => None,
    }
}
