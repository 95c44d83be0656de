use std::collections::HashMap;

use super::{Pipe, PipeError, shape_name};
use crate::output::to_json;
use crate::value::Value;

/// Serializes any value to its compact JSON text.
pub struct Json;

impl Json {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for Json {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for Json {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        Ok(Value::String(to_json(value)))
    }
}

/// Turns an object into an array of `{key, value}` entries, sorted by key
/// so cell output is deterministic.
pub struct KeyValue;

impl KeyValue {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for KeyValue {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipe for KeyValue {
    fn apply(&self, value: &Value, _args: &[String]) -> Result<Value, PipeError> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Object(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                let entries = keys
                    .into_iter()
                    .map(|key| {
                        let item = map.get(&key).cloned().unwrap_or(Value::Null);
                        let mut entry = HashMap::new();
                        entry.insert("key".to_string(), Value::String(key));
                        entry.insert("value".to_string(), item);
                        Value::Object(entry)
                    })
                    .collect();
                Ok(Value::Array(entries))
            }
            other => Err(PipeError::Unsupported {
                pipe: "keyvalue",
                got: shape_name(other),
            }),
        }
    }
}
