//! Tera stage: notice context to Typst markup
//!
//! The template only ever emits context values through the `typst` filter,
//! which writes them as Typst code literals. Text from the payload is
//! therefore data inside the document and never parsed as markup.

use std::collections::HashMap;
use std::error::Error as StdError;

use serde_json::Value;
use tera::{Context, Tera};

use crate::context::NoticeContext;
use crate::error::RenderError;

/// Name the notice template is registered under
pub const TEMPLATE_NAME: &str = "meeting_notice.typ";

/// Render `template_source` with `context` into Typst markup
pub fn render_markup(template_source: &str, context: &NoticeContext) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    tera.register_filter("typst", typst_filter);
    tera.add_raw_template(TEMPLATE_NAME, template_source)
        .map_err(|e| RenderError::Template(error_chain(&e)))?;

    let context = Context::from_serialize(context)
        .map_err(|e| RenderError::Template(error_chain(&e)))?;

    tera.render(TEMPLATE_NAME, &context)
        .map_err(|e| RenderError::Template(error_chain(&e)))
}

fn typst_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(typst_literal(value)))
}

/// Write a JSON value as a Typst code literal.
///
/// Objects become dictionaries, arrays become arrays (with a trailing comma
/// so single elements stay arrays) and `null` becomes `none`.
pub fn typst_literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(value, &mut out);
    out
}

fn write_literal(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("none"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            if n.is_u64() && n.as_i64().is_none() {
                // Beyond Typst's 64-bit signed integers
                out.push_str(&format!("{}.0", n));
            } else {
                out.push_str(&n.to_string());
            }
        }
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('(');
            for item in items {
                write_literal(item, out);
                out.push_str(", ");
            }
            out.push(')');
        }
        Value::Object(map) if map.is_empty() => out.push_str("(:)"),
        Value::Object(map) => {
            out.push('(');
            for (key, item) in map {
                write_string(key, out);
                out.push_str(": ");
                write_literal(item, out);
                out.push_str(", ");
            }
            out.push(')');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Tera nests the useful message in the source chain
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
