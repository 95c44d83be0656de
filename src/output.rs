//! JSON rendering of resolved cell values.
//!
//! Output is deterministic: object keys are sorted, escaping follows JSON
//! string rules, and timestamps render as RFC 3339 strings.

use chrono::SecondsFormat;

use crate::value::Value;

/// Compact JSON, no extra whitespace.
pub fn to_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, false, 0);
    out
}

/// Pretty JSON with two-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, true, 0);
    out
}

const INDENT: &str = "  ";

fn write_value(out: &mut String, value: &Value, pretty: bool, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(n) => out.push_str(&n.to_string()),
        Value::Timestamp(ts) => {
            write_string(out, &ts.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => write_array(out, items, pretty, depth),
        Value::Object(map) => write_object(out, map, pretty, depth),
    }
}

fn write_array(out: &mut String, items: &[Value], pretty: bool, depth: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if pretty {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
        }
        write_value(out, item, pretty, depth + 1);
    }
    if pretty {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }
    out.push(']');
}

fn write_object(
    out: &mut String,
    map: &std::collections::HashMap<String, Value>,
    pretty: bool,
    depth: usize,
) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }

    // Sort keys for deterministic output
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();

    out.push('{');
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if pretty {
            out.push('\n');
            out.push_str(&INDENT.repeat(depth + 1));
        }
        write_string(out, key);
        out.push(':');
        if pretty {
            out.push(' ');
        }
        if let Some(item) = map.get(*key) {
            write_value(out, item, pretty, depth + 1);
        }
    }
    if pretty {
        out.push('\n');
        out.push_str(&INDENT.repeat(depth));
    }
    out.push('}');
}

fn write_string(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
