//! Flattened dump of a JSON message for debug tracing
//!
//! Each leaf becomes one line: `[root].EZMessage.action [string='auth.login']`.
//! Arrays print an `[array]` line followed by their indexed elements.

use serde_json::Value;

const ROOT: &str = "[root]";

/// Flatten JSON text. Invalid JSON yields the parser error.
pub fn flatten_json(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(flatten(&value))
}

pub fn flatten(value: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    walk(value, ROOT.to_string(), &mut lines);
    lines
}

fn walk(value: &Value, prefix: String, out: &mut Vec<String>) {
    match value {
        Value::Null => out.push(format!("{prefix} [null]")),
        Value::Bool(b) => out.push(format!("{prefix} [bool={b}]")),
        Value::String(s) => out.push(format!("{prefix} [string='{s}']")),
        Value::Number(n) => out.push(format!("{prefix} [number={n}]")),
        Value::Array(items) => {
            out.push(format!("{prefix} [array]"));
            for (i, item) in items.iter().enumerate() {
                walk(item, format!("{prefix}[{i}]"), out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                walk(item, format!("{prefix}.{key}"), out);
            }
        }
    }
}
