//! Raw design tree to [`TreeNode`] tree.
//!
//! Each raw node maps to one tree node from its own fields, its parent frame
//! and the options. Nothing depends on sibling order, so children can be
//! mapped in parallel and merged back in paint order.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::{ComponentMapping, Config, GlobalSetting};
use crate::dependency::{aggregate_imports, ImportsType};
use crate::figma::RawNode;
use crate::inspect::{resolve_findings, BoundaryMode, D2CInspect, Diagnostics};
use crate::node::{PropValue, TreeNode};
use crate::style::{resolve_style, BackgroundCollision, ParentFrame, StyleTarget};
use crate::Result;


/// Raw node kinds that are always exported as a replaced image.
const VECTOR_TYPES: [&str; 5] = ["VECTOR", "BOOLEAN_OPERATION", "STAR", "LINE", "POLYGON"];

#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub setting: GlobalSetting,
    pub drop_invisible: bool,
    pub parallel: bool,
    pub components: Vec<ComponentMapping>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            setting: GlobalSetting::default(),
            drop_invisible: true,
            parallel: false,
            components: Vec::new(),
        }
    }
}

impl From<&Config> for TransformOptions {
    fn from(config: &Config) -> Self {
        Self {
            setting: config.global_setting(),
            drop_invisible: config.drop_invisible,
            parallel: config.parallel,
            components: config.components.clone(),
        }
    }
}

/// Result of one transformation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub setting: GlobalSetting,
    pub tree: TreeNode,
    pub imports: ImportsType,
    pub diagnostics: Diagnostics,
}

struct Mapped {
    node: TreeNode,
    diagnostics: Diagnostics,
}

pub struct Transformer {
    options: TransformOptions,
    components: HashMap<String, ComponentMapping>,
}

impl Transformer {
    pub fn new(options: TransformOptions) -> Self {
        let components = options
            .components
            .iter()
            .map(|m| (m.component.clone(), m.clone()))
            .collect();
        Self {
            options,
            components,
        }
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Maps `root` and everything below it. Content problems become findings,
    /// never errors. The root itself is never dropped.
    pub fn transform(&self, root: &RawNode) -> TransformOutput {
        let mapped = self.map_node(root, None);
        let mut diagnostics = mapped.diagnostics;

        let aggregation = aggregate_imports(&mapped.node);
        for conflict in &aggregation.conflicts {
            match D2CInspect::dependency_conflict(conflict) {
                Some(finding) => diagnostics.push(finding),
                None => log::warn!(
                    "import kind conflict on '{}' from '{}' has no node id to report against",
                    conflict.component_name,
                    conflict.package_name
                ),
            }
        }

        log::debug!(
            "transformed '{}' into {} nodes with {} findings",
            root.name,
            mapped.node.node_count(),
            diagnostics.len()
        );
        TransformOutput {
            setting: self.options.setting,
            tree: mapped.node,
            imports: aggregation.imports,
            diagnostics,
        }
    }

    fn map_node(&self, raw: &RawNode, parent: Option<&ParentFrame>) -> Mapped {
        if let Some(detail) = &raw.schema_error {
            return map_placeholder(raw, &format!("malformed node: {}", detail));
        }
        if raw.is_text() {
            return self.map_text(raw, parent);
        }
        if raw.absolute_bounding_box.is_none() {
            return map_placeholder(raw, "missing absoluteBoundingBox");
        }
        if let Some(mapping) = self.component_for(raw) {
            return self.map_component(raw, parent, mapping);
        }
        if let Some(asset) = asset_url(raw) {
            return self.map_asset(raw, parent, asset);
        }
        self.map_container(raw, parent)
    }

    fn map_text(&self, raw: &RawNode, parent: Option<&ParentFrame>) -> Mapped {
        let resolved = resolve_style(raw, parent, StyleTarget::Text);
        let node = base_node("span", raw)
            .with_style(resolved.style)
            .with_text(raw.characters.clone().unwrap_or_default());
        let mut mapped = Mapped::new(node);
        mapped.report_collisions(raw, &resolved.collisions);
        mapped
    }

    fn map_component(
        &self,
        raw: &RawNode,
        parent: Option<&ParentFrame>,
        mapping: &ComponentMapping,
    ) -> Mapped {
        let resolved = resolve_style(raw, parent, StyleTarget::Container);
        let mut node = base_node(mapping.export_name(), raw)
            .with_style(resolved.style)
            .with_component(mapping.package.clone(), mapping.default_module);
        for (name, property) in &raw.component_properties {
            let key = prop_key(name);
            if key.is_empty() {
                log::warn!(
                    "skipping component property '{}' on {}: no usable attribute name",
                    name,
                    raw.id
                );
                continue;
            }
            node.props
                .insert(key, PropValue::Data(property.value.clone()));
        }
        if let Some(text) = raw.first_text() {
            node = node.with_text(text);
        }
        let mut mapped = Mapped::new(node);
        mapped.report_collisions(raw, &resolved.collisions);
        mapped
    }

    fn map_asset(&self, raw: &RawNode, parent: Option<&ParentFrame>, asset: String) -> Mapped {
        let resolved = resolve_style(raw, parent, StyleTarget::Asset);
        let mut node = base_node("img", raw).with_style(resolved.style);
        node.props.src = Some(asset.clone());
        node.props.alt = Some(raw.name.clone());
        let mut mapped = Mapped::new(node.with_asset(asset));
        mapped.report_collisions(raw, &resolved.collisions);
        if !raw.children.is_empty() && !raw.id.is_empty() {
            mapped
                .diagnostics
                .push(D2CInspect::flattened_children(&raw.id, raw.children.len()));
        }
        mapped
    }

    fn map_container(&self, raw: &RawNode, parent: Option<&ParentFrame>) -> Mapped {
        let resolved = resolve_style(raw, parent, StyleTarget::Container);
        let frame = ParentFrame::of(raw);
        let kept: Vec<&RawNode> = raw
            .children
            .iter()
            .filter(|child| self.keeps(child))
            .collect();

        let children: Vec<Mapped> = if self.options.parallel {
            kept.par_iter()
                .map(|child| self.map_node(child, frame.as_ref()))
                .collect()
        } else {
            kept.iter()
                .map(|child| self.map_node(child, frame.as_ref()))
                .collect()
        };

        let mut diagnostics = Diagnostics::new();
        let mut nodes = Vec::with_capacity(children.len());
        for child in children {
            nodes.push(child.node);
            diagnostics.merge(child.diagnostics);
        }

        let node = base_node("div", raw)
            .with_style(resolved.style)
            .with_children(nodes);
        let mut mapped = Mapped::new(node);
        mapped.report_collisions(raw, &resolved.collisions);
        mapped.diagnostics.merge(diagnostics);
        mapped
    }

    fn keeps(&self, raw: &RawNode) -> bool {
        if raw.visible || !self.options.drop_invisible {
            return true;
        }
        log::debug!("dropping invisible node {} ({})", raw.id, raw.name);
        false
    }

    fn component_for(&self, raw: &RawNode) -> Option<&ComponentMapping> {
        if raw.node_type != "INSTANCE" {
            return None;
        }
        let name = raw.component_name.as_deref().unwrap_or(&raw.name);
        self.components.get(name)
    }
}

impl Mapped {
    fn new(node: TreeNode) -> Self {
        Self {
            node,
            diagnostics: Diagnostics::new(),
        }
    }

    fn report_collisions(&mut self, raw: &RawNode, collisions: &[BackgroundCollision]) {
        if raw.id.is_empty() {
            return;
        }
        for collision in collisions {
            self.diagnostics
                .push(D2CInspect::style_ambiguity(&raw.id, collision));
        }
    }
}

fn base_node(tag: &str, raw: &RawNode) -> TreeNode {
    let node = TreeNode::element(tag, raw.name.clone(), raw.node_type.clone());
    if raw.id.is_empty() {
        node
    } else {
        node.with_id(raw.id.clone())
    }
}

/// An empty `div` that keeps the node's identity so siblings still render.
fn map_placeholder(raw: &RawNode, detail: &str) -> Mapped {
    let mut mapped = Mapped::new(base_node("div", raw));
    if raw.id.is_empty() {
        log::warn!("schema violation on unnamed node '{}': {}", raw.name, detail);
    } else {
        mapped
            .diagnostics
            .push(D2CInspect::schema_violation(&raw.id, detail));
    }
    mapped
}

/// The asset a node is exported as, when it is a replaced visual.
fn asset_url(raw: &RawNode) -> Option<String> {
    let image_ref = raw.image_fill().and_then(|p| p.image_ref.clone());
    if VECTOR_TYPES.contains(&raw.node_type.as_str()) {
        return Some(image_ref.unwrap_or_else(|| format!("assets/{}.svg", asset_slug(&raw.id))));
    }
    if raw.children.is_empty() {
        return image_ref;
    }
    None
}

/// File-name safe form of a node id (`12:34` becomes `12-34`).
pub fn asset_slug(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// `Size#12:0` becomes `size`, `Has icon?#3:0` becomes `hasIcon`. Empty when
/// no usable attribute name is left.
fn prop_key(key: &str) -> String {
    let base = key.split('#').next().unwrap_or(key);
    let mut out = String::new();
    let words = base
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty());
    for word in words {
        let mut chars = word.chars();
        if let Some(c) = chars.next() {
            if out.is_empty() {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_numeric()) {
        out.clear();
    }
    out
}

/// Transform and check every finding against the finished tree.
pub fn transform_document(root: &RawNode, config: &Config) -> Result<TransformOutput> {
    transform_with(root, TransformOptions::from(config), config.boundary)
}

pub fn transform_with(
    root: &RawNode,
    options: TransformOptions,
    boundary: BoundaryMode,
) -> Result<TransformOutput> {
    let mut output = Transformer::new(options).transform(root);
    let diagnostics = std::mem::take(&mut output.diagnostics);
    output.diagnostics = resolve_findings(diagnostics, &output.tree, boundary)?;
    Ok(output)
}
