use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Accessor, PipeInvocation, Qualifier, Segment};

// `name[3]` or `name[*]`; anything else is a plain property name.
static QUALIFIED_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+)\[(\*|\d+)\]$").expect("segment pattern"));

/// Parse a compound cell expression into its path and pipe invocations.
///
/// Splits on `|`, trimming each part; the first part is the path, every
/// following part is a pipe invocation. Parsing never fails: a segment that
/// does not match the qualifier grammar is treated as a plain property name
/// and resolves to null at evaluation time if nothing in the document
/// carries that name.
///
/// The splits are deliberately quote-blind, so pipe arguments cannot
/// contain `|` or `:` even inside double quotes.
pub fn parse_expression(input: &str) -> Accessor {
    let mut parts = input.split('|').map(str::trim);
    let path = parts.next().unwrap_or("");

    Accessor {
        segments: parse_path(path),
        pipes: parts.map(parse_invocation).collect(),
    }
}

fn parse_path(path: &str) -> Vec<Segment> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').map(parse_segment).collect()
}

fn parse_segment(part: &str) -> Segment {
    if let Some(caps) = QUALIFIED_SEGMENT.captures(part) {
        let qualifier = if &caps[2] == "*" {
            Some(Qualifier::Wildcard)
        } else {
            // Only fails on an index beyond usize; fall through to a plain
            // segment in that case.
            caps[2].parse().ok().map(Qualifier::Index)
        };
        if let Some(qualifier) = qualifier {
            return Segment {
                name: caps[1].to_string(),
                qualifier: Some(qualifier),
            };
        }
    }
    Segment {
        name: part.to_string(),
        qualifier: None,
    }
}

fn parse_invocation(part: &str) -> PipeInvocation {
    let mut pieces = part.split(':').map(str::trim);
    let name = pieces.next().unwrap_or("").to_string();
    let args = pieces.map(strip_quotes).collect();
    PipeInvocation { name, args }
}

// Strips exactly one pair of enclosing double quotes.
fn strip_quotes(arg: &str) -> String {
    arg.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(arg)
        .to_string()
}
