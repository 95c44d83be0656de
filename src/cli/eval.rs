//! Evaluate a single cell expression against a JSON document

use super::{CliError, json_to_value, value_to_json};
use crate::Evaluator;

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The cell expression to evaluate
    pub expression: String,
    /// JSON input string
    pub input: Option<String>,
}

/// Execute an eval operation
pub fn execute_eval(options: &EvalOptions) -> Result<serde_json::Value, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str)?;

    let evaluator = Evaluator::new();
    let result = evaluator.eval(&json_to_value(document), &options.expression);
    Ok(value_to_json(result))
}
