//! Syntax types for parsed cell expressions.
//!
//! A cell expression is one path followed by zero or more pipe invocations:
//!
//! ```text
//! doc.votes[*].value | sum
//! doc.title | slice:0:48
//! doc.id | ulidToDate | timeago
//! ```

/// Bracket qualifier on a path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum Qualifier {
    /// `name[3]` — descend into one array element
    Index(usize),

    /// `name[*]` — map the remaining path over every array element
    Wildcard,
}

/// One dot-separated step of a path: a property name with an optional
/// trailing qualifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub qualifier: Option<Qualifier>,
}

/// A named transform application of the form `name:arg1:arg2`.
///
/// Arguments are kept as literal strings; each transform interprets its own.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeInvocation {
    pub name: String,
    pub args: Vec<String>,
}

/// A fully parsed cell expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub segments: Vec<Segment>,
    pub pipes: Vec<PipeInvocation>,
}
