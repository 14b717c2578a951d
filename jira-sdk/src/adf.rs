// ABOUTME: Minimal Atlassian Document Format helpers for REST v3 rich-text fields
// ABOUTME: Wraps plain text into documents and flattens documents back to text

use serde_json::{Value, json};

/// Wrap plain text in a document, one paragraph per line
pub fn from_plain_text(text: &str) -> Value {
    let content: Vec<Value> = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                json!({"type": "paragraph", "content": []})
            } else {
                json!({"type": "paragraph", "content": [{"type": "text", "text": line}]})
            }
        })
        .collect();

    json!({"type": "doc", "version": 1, "content": content})
}

/// Render either a plain string or a document as plain text
pub fn to_plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Object(_) => {
            let mut out = String::new();
            collect_text(value, &mut out);
            out.trim_end().to_string()
        }
        other => other.to_string(),
    }
}

fn collect_text(node: &Value, out: &mut String) {
    match node.get("type").and_then(Value::as_str) {
        Some("text") => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        Some("hardBreak") => out.push('\n'),
        Some("mention") => {
            if let Some(text) = node.pointer("/attrs/text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        kind => {
            if let Some(children) = node.get("content").and_then(Value::as_array) {
                for child in children {
                    collect_text(child, out);
                }
            }
            if matches!(
                kind,
                Some("paragraph") | Some("heading") | Some("codeBlock") | Some("listItem")
            ) {
                out.push('\n');
            }
        }
    }
}

/// Convert a plain-string `fields.description` into a document
pub fn convert_description(payload: &Value) -> Value {
    let mut payload = payload.clone();
    if let Some(description) = payload.pointer_mut("/fields/description") {
        if let Value::String(text) = description {
            let document = from_plain_text(text);
            *description = document;
        }
    }
    payload
}
