//! Style attribute emission.

use serde_json::Value;

use crate::node::TreeNode;
use crate::style::value::format_number;

/// Turns a node's style into markup. Backends that write stylesheets plug in
/// here; the renderer only asks for the attribute to put on the element.
pub trait StyleEmitter: Send + Sync {
    /// The full attribute, e.g. `style={{ width: 10 }}`, or `None` when the
    /// node has nothing to emit.
    fn attribute(&self, node: &TreeNode) -> Option<String>;
}

/// Emits React inline style objects. Used for previews.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineStyleEmitter;

impl StyleEmitter for InlineStyleEmitter {
    fn attribute(&self, node: &TreeNode) -> Option<String> {
        let declarations = node.style.declarations();
        if declarations.is_empty() {
            return None;
        }
        let entries: Vec<String> = declarations
            .iter()
            .map(|(key, value)| format!("{}: {}", object_key(key), style_value(key, value)))
            .collect();
        Some(format!("style={{{{ {} }}}}", entries.join(", ")))
    }
}

fn object_key(key: &str) -> String {
    let identifier = key
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if identifier {
        key.to_string()
    } else {
        js_string(key)
    }
}

fn style_value(key: &str, value: &Value) -> String {
    match value {
        // React reads a bare lineHeight number as a multiplier
        Value::Number(n) if key == "lineHeight" => {
            js_string(&format!("{}px", format_number(n.as_f64().unwrap_or_default())))
        }
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => js_string(s),
        other => other.to_string(),
    }
}

/// A double-quoted JS string literal.
pub fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
