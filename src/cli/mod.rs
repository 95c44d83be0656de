//! CLI support for cellpipe
//!
//! Provides programmatic access to the CLI commands for embedding in other
//! tools.

mod convert;
mod eval;
mod table;

pub use convert::{json_to_value, value_to_json};
pub use eval::{EvalOptions, execute_eval};
pub use table::{TableOptions, execute_table};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// No column cell expressions provided
    NoColumns,
    /// Table input is neither a row array nor a `{"rows": [...]}` envelope
    NotRows,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::NoColumns => write!(f, "No columns provided. Pass at least one --cell expression."),
            CliError::NotRows => write!(
                f,
                "Table input must be a JSON array of rows or an object with a \"rows\" array."
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
