//! Render document rows through column cell expressions

use super::{CliError, json_to_value, value_to_json};
use crate::{Evaluator, Value};

/// Options for the table command
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// One cell expression per column, applied to every row
    pub cells: Vec<String>,
    /// JSON input string
    pub input: Option<String>,
}

/// Execute a table operation: every row renders to an array with one entry
/// per cell expression.
pub fn execute_table(options: &TableOptions) -> Result<serde_json::Value, CliError> {
    if options.cells.is_empty() {
        return Err(CliError::NoColumns);
    }
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str)?;
    let rows = extract_rows(json_to_value(document))?;

    let evaluator = Evaluator::new();
    let rendered: Vec<Value> = rows
        .iter()
        .map(|row| {
            Value::Array(
                options
                    .cells
                    .iter()
                    .map(|cell| evaluator.eval(row, cell))
                    .collect(),
            )
        })
        .collect();
    Ok(value_to_json(Value::Array(rendered)))
}

// Rows arrive either as a plain JSON array or wrapped in a CouchDB-style
// `{"rows": [...]}` envelope, the shape the document store's _all_docs
// endpoint returns.
fn extract_rows(document: Value) -> Result<Vec<Value>, CliError> {
    match document {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut map) => match map.remove("rows") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => Err(CliError::NotRows),
        },
        _ => Err(CliError::NotRows),
    }
}
