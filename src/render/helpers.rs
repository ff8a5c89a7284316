//! Tera testers and functions available to every template.
//!
//! ```text
//! {% for entry in entries %}
//!   {% if entry is public_method %}...{% endif %}
//! {% endfor %}
//! {{ format(fmt="%s/%s", args=[a, b]) }}
//! ```

use crate::model::{tags_mark_class, DocBlock, Tag};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tera::{Tera, Value};

pub(crate) fn register(tera: &mut Tera) {
    tera.register_tester("class", is_class);
    tera.register_tester("public_method", is_public_method);
    tera.register_tester("property", is_property);
    tera.register_tester("class_constant", is_class_constant);
    tera.register_function("format", format);
}

fn decode<T: DeserializeOwned>(value: Option<&Value>, tester: &str) -> tera::Result<T> {
    let value = value.ok_or_else(|| {
        tera::Error::msg(format!("tester `{}` called on an undefined value", tester))
    })?;
    tera::from_value(value.clone())
        .map_err(|e| tera::Error::msg(format!("tester `{}`: {}", tester, e)))
}

/// Accepts a block or a bare tag list.
fn is_class(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    if value.is_some_and(Value::is_array) {
        let tags: Vec<Tag> = decode(value, "class")?;
        return Ok(tags_mark_class(&tags));
    }
    Ok(decode::<DocBlock>(value, "class")?.is_class())
}

fn is_public_method(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    Ok(decode::<DocBlock>(value, "public_method")?.is_public_method())
}

fn is_property(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    Ok(decode::<DocBlock>(value, "property")?.is_property())
}

fn is_class_constant(value: Option<&Value>, _args: &[Value]) -> tera::Result<bool> {
    Ok(decode::<DocBlock>(value, "class_constant")?.is_class_constant())
}

fn format(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let fmt = args
        .get("fmt")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("format expects a `fmt` string argument"))?;
    let values: &[Value] = match args.get("args") {
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) => std::slice::from_ref(other),
        None => &[],
    };
    Ok(Value::String(apply_format(fmt, values)))
}

/// printf-style substitution: `%s` text, `%d` number, `%j` JSON, `%%` a
/// literal percent. Leftover values are appended, space separated.
pub fn apply_format(fmt: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut remaining = values.iter();
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some(&spec @ ('s' | 'd' | 'j')) => {
                chars.next();
                match remaining.next() {
                    Some(value) => out.push_str(&format_value(spec, value)),
                    None => {
                        out.push('%');
                        out.push(spec);
                    }
                }
            }
            _ => out.push('%'),
        }
    }

    for value in remaining {
        out.push(' ');
        out.push_str(&display(value));
    }
    out
}

fn format_value(spec: char, value: &Value) -> String {
    match spec {
        'd' => {
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                _ => None,
            };
            match number {
                Some(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", n as i64),
                Some(n) => n.to_string(),
                None => "NaN".to_string(),
            }
        }
        'j' => value.to_string(),
        _ => display(value),
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_substitutes_in_order() {
        let out = apply_format("%s/%s.rst", &[json!("docs"), json!("db")]);
        assert_eq!(out, "docs/db.rst");
    }

    #[test]
    fn format_numbers_json_and_percent() {
        assert_eq!(apply_format("%d%%", &[json!(42)]), "42%");
        assert_eq!(apply_format("%d", &[json!("x")]), "NaN");
        assert_eq!(apply_format("%j", &[json!({"a": 1})]), r#"{"a":1}"#);
    }

    #[test]
    fn format_missing_and_extra_values() {
        assert_eq!(apply_format("%s and %s", &[json!("a")]), "a and %s");
        assert_eq!(apply_format("%s", &[json!("a"), json!(2)]), "a 2");
        assert_eq!(apply_format("100%", &[]), "100%");
    }

    #[test]
    fn class_tester_accepts_tag_list() {
        let tags = json!([{"type": "class", "string": ""}]);
        assert!(is_class(Some(&tags), &[]).unwrap());

        let block = json!({"tags": [{"type": "param"}]});
        assert!(!is_class(Some(&block), &[]).unwrap());
    }

    #[test]
    fn testers_reject_undefined() {
        assert!(is_property(None, &[]).is_err());
    }

    #[test]
    fn public_method_tester() {
        let block = json!({
            "isPrivate": false,
            "ctx": {"type": "method", "name": "find", "string": "find()"}
        });
        assert!(is_public_method(Some(&block), &[]).unwrap());
    }

    #[test]
    fn format_function_in_template() {
        let mut tera = Tera::default();
        register(&mut tera);
        tera.add_raw_template("t", r#"{{ format(fmt="%s.%s", args=["a", "b"]) }}"#)
            .unwrap();
        let out = tera.render("t", &tera::Context::new()).unwrap();
        assert_eq!(out, "a.b");
    }
}
