//! Code context detection from the first line of a block's code.

use crate::model::{CodeContext, ContextKind};
use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION_STATEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^function (\w+) *\(").unwrap());

static RE_FUNCTION_EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^var *(\w+) *= *function").unwrap());

static RE_PROTOTYPE_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\.prototype\.(\w+) *= *function").unwrap());

static RE_PROTOTYPE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\.prototype\.(\w+) *= *([^\n;]+)").unwrap());

static RE_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w.]+)\.(\w+) *= *function").unwrap());

static RE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\.(\w+) *= *([^\n;]+)").unwrap());

static RE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^var +(\w+) *= *([^\n;]+)").unwrap());

/// Classify the first line of `code`. First matching form wins.
pub fn parse_code_context(code: &str) -> Option<CodeContext> {
    let line = code.lines().next()?;

    if let Some(caps) = RE_FUNCTION_STATEMENT
        .captures(line)
        .or_else(|| RE_FUNCTION_EXPRESSION.captures(line))
    {
        let name = caps[1].to_string();
        return Some(CodeContext {
            kind: ContextKind::Function,
            string: format!("{}()", name),
            name,
            constructor: None,
            receiver: None,
            value: None,
        });
    }

    if let Some(caps) = RE_PROTOTYPE_METHOD.captures(line) {
        return Some(CodeContext {
            kind: ContextKind::Method,
            name: caps[2].to_string(),
            string: format!("{}.prototype.{}()", &caps[1], &caps[2]),
            constructor: Some(caps[1].to_string()),
            receiver: None,
            value: None,
        });
    }

    if let Some(caps) = RE_PROTOTYPE_PROPERTY.captures(line) {
        return Some(CodeContext {
            kind: ContextKind::Property,
            name: caps[2].to_string(),
            string: format!("{}.prototype.{}", &caps[1], &caps[2]),
            constructor: Some(caps[1].to_string()),
            receiver: None,
            value: Some(caps[3].to_string()),
        });
    }

    if let Some(caps) = RE_METHOD.captures(line) {
        return Some(CodeContext {
            kind: ContextKind::Method,
            name: caps[2].to_string(),
            string: format!("{}.{}()", &caps[1], &caps[2]),
            constructor: None,
            receiver: Some(caps[1].to_string()),
            value: None,
        });
    }

    if let Some(caps) = RE_PROPERTY.captures(line) {
        return Some(CodeContext {
            kind: ContextKind::Property,
            name: caps[2].to_string(),
            string: format!("{}.{}", &caps[1], &caps[2]),
            constructor: None,
            receiver: Some(caps[1].to_string()),
            value: Some(caps[3].to_string()),
        });
    }

    if let Some(caps) = RE_DECLARATION.captures(line) {
        return Some(CodeContext {
            kind: ContextKind::Declaration,
            name: caps[1].to_string(),
            string: caps[1].to_string(),
            constructor: None,
            receiver: None,
            value: Some(caps[2].to_string()),
        });
    }

    None
}
