// src/signature.rs

//! Dependency declarations and textual signature parsing.
//!
//! The explicit ordered list is the primary way to declare a step's
//! dependencies. As a secondary form, a step may carry a declared-signature
//! string such as `"(getA, getB)"` or `"getA =>"`, which is parsed
//! textually: comments are stripped, then either a single-parameter arrow
//! form or a parenthesized parameter list is matched, split on commas and
//! trimmed. Each token is reduced to its leading identifier so a default
//! value or trailing punctuation does not corrupt the name.
//!
//! Parsing never validates that the names match real steps; an unresolved
//! name simply yields a null value at execution time.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::StepName;

/// Single-parameter arrow form: `dep => ...` (no parentheses).
static ARROW_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^()]+?)\s*=>").expect("arrow signature pattern"));

/// Standard parenthesized parameter list: `name(a, b)` or `(a, b)`.
static STD_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[^(]*\(\s*([^)]*)\)").expect("std signature pattern"));

/// Line and block comments inside a signature string.
static STRIP_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/|//[^\n]*").expect("comment pattern"));

/// Leading identifier of a parameter token.
static LEADING_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern"));

/// How a step's dependencies are declared.
#[derive(Debug, Clone)]
pub enum DependencySpec {
    /// No declaration at all: the step is a leaf with no dependencies,
    /// whatever its operation actually consumes.
    Bare,
    /// Explicit ordered list of step names.
    Explicit(Vec<StepName>),
    /// Textual signature to parse, e.g. `"(getA, getB)"`.
    Signature(String),
}

impl DependencySpec {
    /// Resolve the declaration to an ordered list of dependency names.
    pub fn resolve(&self) -> Vec<StepName> {
        match self {
            DependencySpec::Bare => Vec::new(),
            DependencySpec::Explicit(names) => names.clone(),
            DependencySpec::Signature(src) => parse_signature(src),
        }
    }
}

/// Parse a textual signature into an ordered list of dependency names.
///
/// Returns an empty list when neither the arrow form nor the parenthesized
/// form matches, so a malformed signature degrades to "no dependencies"
/// rather than an error.
pub fn parse_signature(src: &str) -> Vec<StepName> {
    let cleaned = STRIP_COMMENTS.replace_all(src, "");

    let params = ARROW_ARGS
        .captures(&cleaned)
        .or_else(|| STD_ARGS.captures(&cleaned))
        .map(|caps| caps[1].to_string());

    let Some(params) = params else {
        return Vec::new();
    };

    params
        .split(',')
        .filter_map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            Some(match LEADING_IDENT.find(token) {
                Some(ident) => ident.as_str().to_string(),
                None => token.to_string(),
            })
        })
        .collect()
}
