//! The generated-code tree.
//!
//! [`TreeNode`] is the IR between design input and code output. Its payload
//! is a [`NodeContent`] variant, so a node carries children, text or an asset
//! but never two of them. Node-valued props are wrapped in
//! [`PropValue::Node`], which keeps transformed nodes apart from plain data
//! stored under the same prop map.

use std::collections::{BTreeMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dependency::{Dependency, DependencySet};
use crate::error::{D2cError, Result};
use crate::style::TreeNodeStyle;
use crate::template::{HookHandle, TemplateBinding};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeNodeRepr", into = "TreeNodeRepr")]
pub struct TreeNode {
    pub tag: String,
    /// Set only when `tag` is a component imported from this package.
    pub package_name: Option<String>,
    pub default_module: bool,
    pub style: TreeNodeStyle,
    pub props: Props,
    pub content: NodeContent,
    pub dependencies: DependencySet,
    /// Layer name from the design file. Not unique.
    pub name: String,
    /// Source node kind, e.g. `FRAME` or `TEXT`.
    pub node_type: String,
    pub id: Option<String>,
    pub template: TemplateBinding,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeContent {
    Children(Vec<TreeNode>),
    Text(String),
    /// Replaced visual; the asset URL stands in for any descendants.
    Asset(String),
}

impl Default for NodeContent {
    fn default() -> Self {
        NodeContent::Children(Vec::new())
    }
}

/// Element attributes. The common ones are typed, the rest go through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, PropValue>,
}

impl Props {
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none() && self.src.is_none() && self.alt.is_none() && self.extra.is_empty()
    }

    /// Sets a prop. String values for `className`, `src` and `alt` land in
    /// their typed fields.
    pub fn insert(&mut self, key: impl Into<String>, value: PropValue) {
        let key = key.into();
        if let PropValue::Data(serde_json::Value::String(text)) = &value {
            let slot = match key.as_str() {
                "className" => Some(&mut self.class_name),
                "src" => Some(&mut self.src),
                "alt" => Some(&mut self.alt),
                _ => None,
            };
            if let Some(slot) = slot {
                *slot = Some(text.clone());
                return;
            }
        }
        self.extra.insert(key, value);
    }

    /// Prop nodes in key order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.extra.iter().filter_map(|(key, value)| match value {
            PropValue::Node(node) => Some((key.as_str(), node.as_ref())),
            PropValue::Data(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum PropValue {
    Node(Box<TreeNode>),
    Data(serde_json::Value),
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        PropValue::Data(value)
    }
}

impl From<TreeNode> for PropValue {
    fn from(node: TreeNode) -> Self {
        PropValue::Node(Box::new(node))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeShapeError {
    #[error("tag must not be empty")]
    EmptyTag,
    #[error("node carries both text and asset")]
    TextAndAsset,
    #[error("node with {0} must not have children")]
    PayloadWithChildren(&'static str),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TreeNodeRepr {
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package_name: Option<String>,
    #[serde(default)]
    default_module: bool,
    #[serde(default)]
    style: TreeNodeStyle,
    #[serde(default)]
    props: Props,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
    #[serde(default)]
    dependencies: DependencySet,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to_template: Option<HookHandle>,
}

impl TryFrom<TreeNodeRepr> for TreeNode {
    type Error = NodeShapeError;

    fn try_from(repr: TreeNodeRepr) -> std::result::Result<Self, Self::Error> {
        if repr.tag.is_empty() {
            return Err(NodeShapeError::EmptyTag);
        }
        let content = match (repr.text, repr.asset) {
            (Some(_), Some(_)) => return Err(NodeShapeError::TextAndAsset),
            (Some(text), None) if repr.children.is_empty() => NodeContent::Text(text),
            (Some(_), None) => return Err(NodeShapeError::PayloadWithChildren("text")),
            (None, Some(asset)) if repr.children.is_empty() => NodeContent::Asset(asset),
            (None, Some(_)) => return Err(NodeShapeError::PayloadWithChildren("asset")),
            (None, None) => NodeContent::Children(repr.children),
        };
        Ok(TreeNode {
            tag: repr.tag,
            package_name: repr.package_name,
            default_module: repr.default_module,
            style: repr.style,
            props: repr.props,
            content,
            dependencies: repr.dependencies,
            name: repr.name,
            node_type: repr.node_type,
            id: repr.id,
            template: repr.to_template.into(),
        })
    }
}

impl From<TreeNode> for TreeNodeRepr {
    fn from(node: TreeNode) -> Self {
        let (children, text, asset) = match node.content {
            NodeContent::Children(children) => (children, None, None),
            NodeContent::Text(text) => (Vec::new(), Some(text), None),
            NodeContent::Asset(asset) => (Vec::new(), None, Some(asset)),
        };
        TreeNodeRepr {
            tag: node.tag,
            package_name: node.package_name,
            default_module: node.default_module,
            style: node.style,
            props: node.props,
            children,
            dependencies: node.dependencies,
            name: node.name,
            node_type: node.node_type,
            text,
            asset,
            id: node.id,
            to_template: node.template.handle().cloned(),
        }
    }
}

impl TreeNode {
    pub fn element(
        tag: impl Into<String>,
        name: impl Into<String>,
        node_type: impl Into<String>,
    ) -> Self {
        Self {
            tag: tag.into(),
            package_name: None,
            default_module: false,
            style: TreeNodeStyle::default(),
            props: Props::default(),
            content: NodeContent::default(),
            dependencies: DependencySet::new(),
            name: name.into(),
            node_type: node_type.into(),
            id: None,
            template: TemplateBinding::NoOverride,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style: TreeNodeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = NodeContent::Text(text.into());
        self
    }

    pub fn with_asset(mut self, asset: impl Into<String>) -> Self {
        self.content = NodeContent::Asset(asset.into());
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.content = NodeContent::Children(children);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value.into());
        self
    }

    pub fn with_template(mut self, handle: HookHandle) -> Self {
        self.template = TemplateBinding::Override(handle);
        self
    }

    /// Marks `tag` as a component imported from `package` and records the
    /// matching dependency.
    pub fn with_component(mut self, package: impl Into<String>, default_module: bool) -> Self {
        let package = package.into();
        self.dependencies
            .insert(Dependency::new(self.tag.clone(), package.clone(), default_module));
        self.package_name = Some(package);
        self.default_module = default_module;
        self
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.content {
            NodeContent::Children(children) => children,
            _ => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn asset(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Asset(asset) => Some(asset),
            _ => None,
        }
    }

    /// Pre-order walk: the node, its prop nodes, then its children.
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a TreeNode)) {
        f(self);
        for (_, prop) in self.props.nodes() {
            prop.visit(f);
        }
        for child in self.children() {
            child.visit(f);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.visit(&mut |node| {
            if let Some(id) = node.id.as_deref() {
                ids.push(id);
            }
        });
        ids
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        let mut found = None;
        self.visit(&mut |node| {
            if found.is_none() && node.id.as_deref() == Some(id) {
                found = Some(node);
            }
        });
        found
    }

    /// Checks the invariants the type system does not cover.
    pub fn validate(&self) -> Vec<NodeViolation> {
        let mut violations = Vec::new();
        let mut seen = HashSet::new();
        self.visit(&mut |node| {
            if node.tag.is_empty() {
                violations.push(NodeViolation::EmptyTag {
                    node: node.label(),
                });
            }
            if let Some(package) = &node.package_name {
                match node.dependencies.get(&node.tag, package) {
                    Some(dep) if dep.default_module == node.default_module => {}
                    Some(_) => violations.push(NodeViolation::ImportKindMismatch {
                        node: node.label(),
                        package: package.clone(),
                    }),
                    None => violations.push(NodeViolation::MissingDependency {
                        node: node.label(),
                        package: package.clone(),
                    }),
                }
            }
            if let Some(id) = node.id.as_deref() {
                if !seen.insert(id) {
                    violations.push(NodeViolation::DuplicateId(id.to_string()));
                }
            }
        });
        violations
    }

    /// Validates and locks the tree for rendering.
    pub fn freeze(self) -> Result<FrozenTree> {
        let violations = self.validate();
        if !violations.is_empty() {
            let joined: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(D2cError::InvalidTree(joined.join("; ")));
        }
        Ok(FrozenTree(Arc::new(self)))
    }

    fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| format!("<{}> {}", self.tag, self.name))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NodeViolation {
    #[error("node {node}: empty tag")]
    EmptyTag { node: String },
    #[error("node {node}: claims package '{package}' without a matching dependency")]
    MissingDependency { node: String, package: String },
    #[error("node {node}: import kind disagrees with its dependency on '{package}'")]
    ImportKindMismatch { node: String, package: String },
    #[error("duplicate node id '{0}'")]
    DuplicateId(String),
}

/// A validated tree that can no longer be mutated.
#[derive(Debug, Clone)]
pub struct FrozenTree(Arc<TreeNode>);

impl Deref for FrozenTree {
    type Target = TreeNode;

    fn deref(&self) -> &TreeNode {
        &self.0
    }
}

impl Serialize for FrozenTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
