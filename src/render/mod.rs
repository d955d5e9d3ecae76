//! JSX serialization of a frozen tree.
//!
//! Nodes bound to a hook are emitted through it; everything else goes through
//! the default serializer, which hooks can also call back into. A hook that
//! fails, panics or is not registered leaves its node on the default path and
//! produces one `hookFailure` warning.

pub mod style;

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;

use crate::dependency::{render_imports, ImportsType};
use crate::inspect::{D2CInspect, Diagnostics};
use crate::node::{FrozenTree, NodeContent, PropValue, TreeNode};
use crate::template::{GenerationHooks, HookError, HookHandle, HookRegistry};

pub use style::{js_string, InlineStyleEmitter, StyleEmitter};

const INDENT: &str = "  ";

/// Markup for one tree plus the findings raised while producing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub markup: String,
    pub diagnostics: Diagnostics,
}

/// Identity a hook result is cached under. Clones handed to
/// [`GenerationHooks::generate_template`] keep their id and so share the
/// entry of the node they were copied from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    Id(String),
    /// Pre-order index of an id-less node of the tree being rendered.
    Position(usize),
}

pub struct TemplateRenderer<'a> {
    registry: &'a HookRegistry,
    emitter: &'a dyn StyleEmitter,
    /// Hook results by node identity. `None` marks a node that fell back.
    cache: RefCell<HashMap<NodeKey, Option<String>>>,
    /// Pre-order indices of the id-less nodes of the tree being rendered.
    positions: RefCell<HashMap<*const TreeNode, usize>>,
    diagnostics: RefCell<Diagnostics>,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(registry: &'a HookRegistry, emitter: &'a dyn StyleEmitter) -> Self {
        Self {
            registry,
            emitter,
            cache: RefCell::new(HashMap::new()),
            positions: RefCell::new(HashMap::new()),
            diagnostics: RefCell::new(Diagnostics::new()),
        }
    }

    pub fn render(&self, tree: &FrozenTree) -> Rendered {
        self.render_at(tree, 0)
    }

    /// Renders with continuation lines indented `depth` levels.
    pub fn render_at(&self, tree: &FrozenTree, depth: usize) -> Rendered {
        self.cache.borrow_mut().clear();
        {
            let mut positions = self.positions.borrow_mut();
            positions.clear();
            let mut index = 0;
            tree.visit(&mut |node| {
                if node.id.is_none() {
                    positions.insert(node as *const TreeNode, index);
                }
                index += 1;
            });
        }
        let markup = self.render_node(tree, depth);
        self.positions.borrow_mut().clear();
        Rendered {
            markup,
            diagnostics: self.diagnostics.take(),
        }
    }

    fn render_node(&self, node: &TreeNode, depth: usize) -> String {
        if let Some(handle) = node.template.handle() {
            if let Some(output) = self.hook_output(node, handle) {
                return output;
            }
        }
        self.render_default(node, depth)
    }

    fn node_key(&self, node: &TreeNode) -> Option<NodeKey> {
        match node.id.as_deref() {
            Some(id) => Some(NodeKey::Id(id.to_string())),
            None => self
                .positions
                .borrow()
                .get(&(node as *const TreeNode))
                .map(|index| NodeKey::Position(*index)),
        }
    }

    /// Runs the node's hook at most once per render.
    fn hook_output(&self, node: &TreeNode, handle: &HookHandle) -> Option<String> {
        let key = self.node_key(node);
        match &key {
            Some(key) => {
                if let Some(cached) = self.cache.borrow().get(key) {
                    return cached.clone();
                }
                // a hook re-entering its own node gets the default output
                self.cache.borrow_mut().insert(key.clone(), None);
            }
            None => log::debug!("<{}> is outside the rendered tree; its hook is not cached", node.tag),
        }

        let result = self.registry.resolve(handle).and_then(|hook| {
            match catch_unwind(AssertUnwindSafe(|| hook.to_template(node, self))) {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(message)) => Err(HookError::failed(handle, message)),
                Err(_) => Err(HookError::Panicked(handle.clone())),
            }
        });

        match result {
            Ok(output) => {
                if let Some(key) = key {
                    self.cache.borrow_mut().insert(key, Some(output.clone()));
                }
                Some(output)
            }
            Err(err) => {
                log::warn!("{}; falling back to default output", err);
                match node.id.as_deref() {
                    Some(id) => self
                        .diagnostics
                        .borrow_mut()
                        .push(D2CInspect::hook_failure(id, &err)),
                    None => log::warn!("hook failure on <{}> has no node id", node.tag),
                }
                None
            }
        }
    }

    fn render_default(&self, node: &TreeNode, depth: usize) -> String {
        let mut open = format!("<{}", node.tag);
        for attr in self.attributes(node, depth) {
            open.push(' ');
            open.push_str(&attr);
        }

        match &node.content {
            NodeContent::Text(text) => format!("{}>{}</{}>", open, jsx_text(text), node.tag),
            NodeContent::Asset(_) => format!("{} />", open),
            NodeContent::Children(children) if children.is_empty() => format!("{} />", open),
            NodeContent::Children(children) => {
                let inner = INDENT.repeat(depth + 1);
                let mut out = format!("{}>", open);
                for child in children {
                    out.push('\n');
                    out.push_str(&inner);
                    out.push_str(&self.render_node(child, depth + 1));
                }
                out.push('\n');
                out.push_str(&INDENT.repeat(depth));
                out.push_str(&format!("</{}>", node.tag));
                out
            }
        }
    }

    fn attributes(&self, node: &TreeNode, depth: usize) -> Vec<String> {
        let mut attrs = Vec::new();
        let props = &node.props;
        if let Some(class_name) = &props.class_name {
            attrs.push(string_attr("className", class_name));
        }
        match (&props.src, &node.content) {
            (Some(src), _) => attrs.push(string_attr("src", src)),
            (None, NodeContent::Asset(asset)) => attrs.push(string_attr("src", asset)),
            _ => {}
        }
        if let Some(alt) = &props.alt {
            attrs.push(string_attr("alt", alt));
        }
        for (key, value) in &props.extra {
            if !is_attribute_name(key) {
                log::warn!("<{}> prop '{}' is not a valid JSX attribute name; skipped", node.tag, key);
                continue;
            }
            match value {
                PropValue::Node(child) => {
                    attrs.push(format!("{}={{{}}}", key, self.render_node(child, depth)))
                }
                PropValue::Data(data) => attrs.push(data_attr(key, data)),
            }
        }
        if let Some(style) = self.emitter.attribute(node) {
            attrs.push(style);
        }
        attrs
    }
}

impl GenerationHooks for TemplateRenderer<'_> {
    fn generate_template(&self, node: &TreeNode) -> String {
        self.render_default(node, 0)
    }
}

fn is_attribute_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '$' | '-'))
}

fn string_attr(key: &str, value: &str) -> String {
    if value.contains(['"', '\\', '{', '}', '\n']) {
        format!("{}={{{}}}", key, js_string(value))
    } else {
        format!("{}=\"{}\"", key, value)
    }
}

fn data_attr(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => string_attr(key, s),
        Value::Bool(true) => key.to_string(),
        other => format!("{}={{{}}}", key, other),
    }
}

fn jsx_text(text: &str) -> String {
    if text.contains(['{', '}', '<', '>', '\n']) {
        format!("{{{}}}", js_string(text))
    } else {
        text.to_string()
    }
}

/// A complete JSX module: imports followed by one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedModule {
    pub source: String,
    pub diagnostics: Diagnostics,
}

pub fn render_module(
    renderer: &TemplateRenderer<'_>,
    tree: &FrozenTree,
    imports: &ImportsType,
    component_name: &str,
) -> RenderedModule {
    let rendered = renderer.render_at(tree, 2);
    let mut source = String::new();
    let import_block = render_imports(imports);
    if !import_block.is_empty() {
        source.push_str(&import_block);
        source.push_str("\n\n");
    }
    source.push_str(&format!(
        "export default function {}() {{\n  return (\n    {}\n  );\n}}\n",
        component_name, rendered.markup
    ));
    RenderedModule {
        source,
        diagnostics: rendered.diagnostics,
    }
}
