use log::debug;

use crate::ast::PipeInvocation;
use crate::parser;
use crate::pipes::{Pipe, PipeError, PipeRegister, standard_pipes};
use crate::resolver;
use crate::value::Value;

/// The cell expression evaluator.
///
/// Resolves an expression's path against a document, then threads the
/// result through the expression's pipe chain in textual order. Holds the
/// pipe register as its only state; the register is populated before first
/// use and only read afterwards, so a single evaluator can be shared by
/// reference across concurrent rendering contexts.
pub struct Evaluator {
    pipes: PipeRegister,
}

/// Result of one pipe stage, making the swallow-on-fault rule an explicit
/// branch instead of implicit exception suppression.
#[derive(Debug)]
pub enum StageOutcome {
    /// The transform ran and produced the next running value
    Applied(Value),

    /// The stage was skipped; the running value carries over unchanged
    Skipped(SkipReason),
}

#[derive(Debug)]
pub enum SkipReason {
    /// No transform registered under the invoked name
    UnknownPipe,

    /// The transform raised a fault
    Failed(PipeError),
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with the standard transform set registered.
    pub fn new() -> Self {
        Evaluator {
            pipes: standard_pipes(),
        }
    }

    /// Creates an evaluator with an empty register. Every invocation is a
    /// pass-through until transforms are registered.
    pub fn empty() -> Self {
        Evaluator {
            pipes: PipeRegister::new(),
        }
    }

    /// Registers a transform under a name, replacing any existing entry.
    ///
    /// Hosting layers extend the register through this before handing the
    /// evaluator to rendering code.
    pub fn register(&mut self, name: impl Into<String>, pipe: Box<dyn Pipe + Sync>) {
        self.pipes.insert(name.into(), pipe);
    }

    /// Registered transform names, sorted.
    pub fn pipe_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pipes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Evaluates a compound cell expression against a document.
    ///
    /// A null document or blank expression returns the document unchanged.
    /// Otherwise the path resolves first, and each pipe invocation then
    /// transforms the running value left to right. Unknown pipe names and
    /// transform faults skip their stage; the chain continues with the
    /// pre-invocation value. Nothing here errors — a malformed expression
    /// or document fragment degrades to null, never aborts.
    ///
    /// # Examples
    ///
    /// ```
    /// use cellpipe::{Evaluator, Value};
    /// use std::collections::HashMap;
    ///
    /// let mut doc = HashMap::new();
    /// doc.insert("title".to_string(), Value::String("HelloWorld".to_string()));
    /// let doc = Value::Object(doc);
    ///
    /// let evaluator = Evaluator::new();
    /// assert_eq!(
    ///     evaluator.eval(&doc, "title | slice:0:5"),
    ///     Value::String("Hello".to_string()),
    /// );
    /// ```
    pub fn eval(&self, document: &Value, expression: &str) -> Value {
        if matches!(document, Value::Null) || expression.trim().is_empty() {
            return document.clone();
        }

        let accessor = parser::parse_expression(expression);
        let mut current = resolver::resolve(document, &accessor.segments);

        for invocation in &accessor.pipes {
            match self.apply_stage(&current, invocation) {
                StageOutcome::Applied(next) => current = next,
                StageOutcome::Skipped(reason) => {
                    debug!("pipe `{}` skipped: {:?}", invocation.name, reason);
                }
            }
        }
        current
    }

    /// Runs a single pipe invocation against a running value.
    pub fn apply_stage(&self, value: &Value, invocation: &PipeInvocation) -> StageOutcome {
        match self.pipes.get(&invocation.name) {
            None => StageOutcome::Skipped(SkipReason::UnknownPipe),
            Some(pipe) => match pipe.apply(value, &invocation.args) {
                Ok(next) => StageOutcome::Applied(next),
                Err(fault) => StageOutcome::Skipped(SkipReason::Failed(fault)),
            },
        }
    }
}
