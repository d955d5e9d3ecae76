//! Diagnostic findings attached to tree nodes by id.
//!
//! Findings are accumulated over a whole run in a [`Diagnostics`] list and
//! checked against the finished tree by [`resolve_findings`] before they are
//! handed to a presentation layer.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dependency::DependencyConflict;
use crate::error::{D2cError, Result};
use crate::node::TreeNode;
use crate::style::BackgroundCollision;
use crate::template::HookError;

/// Machine keys of the findings this crate produces.
pub mod names {
    pub const SCHEMA_VIOLATION: &str = "schemaViolation";
    pub const STYLE_AMBIGUITY: &str = "styleAmbiguity";
    pub const DEPENDENCY_CONFLICT: &str = "dependencyConflict";
    pub const HOOK_FAILURE: &str = "hookFailure";
    pub const FLATTENED_CHILDREN: &str = "flattenedChildren";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectType {
    Info,
    Warning,
    Error,
}

impl fmt::Display for InspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InspectType::Info => "info",
            InspectType::Warning => "warning",
            InspectType::Error => "error",
        };
        f.write_str(s)
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct D2CInspect {
    pub inspect_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect_chinese_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect_description: Option<String>,
    pub inspect_type: InspectType,
    pub inspect_title: String,
    pub inspect_message: String,
    /// Never empty; ids are unique within a finding.
    pub node_ids: Vec<String>,
    #[serde(rename = "docURL", default, skip_serializing_if = "Option::is_none")]
    pub doc_url: Option<String>,
    #[serde(rename = "imgURL", default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl D2CInspect {
    pub fn new(
        inspect_name: impl Into<String>,
        inspect_type: InspectType,
        node_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            inspect_name: inspect_name.into(),
            inspect_chinese_name: None,
            inspect_description: None,
            inspect_type,
            inspect_title: title.into(),
            inspect_message: message.into(),
            node_ids: vec![node_id.into()],
            doc_url: None,
            img_url: None,
            default_visible: None,
            color: None,
        }
    }

    pub fn with_node(mut self, node_id: impl Into<String>) -> Self {
        let node_id = node_id.into();
        if !self.node_ids.contains(&node_id) {
            self.node_ids.push(node_id);
        }
        self
    }

    pub fn with_chinese_name(mut self, name: impl Into<String>) -> Self {
        self.inspect_chinese_name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.inspect_description = Some(description.into());
        self
    }

    pub fn with_doc_url(mut self, url: impl Into<String>) -> Self {
        self.doc_url = Some(url.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn schema_violation(node_id: &str, detail: &str) -> Self {
        Self::new(
            names::SCHEMA_VIOLATION,
            InspectType::Error,
            node_id,
            "Node could not be mapped",
            format!("{}; an empty placeholder was emitted instead", detail),
        )
        .with_chinese_name("结构异常")
        .with_color("#f93920")
    }

    pub fn style_ambiguity(node_id: &str, collision: &BackgroundCollision) -> Self {
        Self::new(
            names::STYLE_AMBIGUITY,
            InspectType::Warning,
            node_id,
            "Conflicting background values",
            format!(
                "kept {}, discarded {} ({})",
                collision.kept, collision.discarded, collision.discarded_value
            ),
        )
        .with_chinese_name("样式冲突")
        .with_color("#fc8800")
    }

    /// `None` when none of the claiming nodes has an id.
    pub fn dependency_conflict(conflict: &DependencyConflict) -> Option<Self> {
        let (first, rest) = conflict.node_ids.split_first()?;
        let kind = if conflict.kept_default { "default" } else { "named" };
        let finding = Self::new(
            names::DEPENDENCY_CONFLICT,
            InspectType::Warning,
            first.as_str(),
            "Conflicting import kinds",
            format!(
                "'{}' from '{}' is imported both as default and named; keeping the {} import",
                conflict.component_name, conflict.package_name, kind
            ),
        )
        .with_chinese_name("依赖冲突")
        .with_color("#fc8800");
        Some(rest.iter().fold(finding, |f, id| f.with_node(id.as_str())))
    }

    pub fn hook_failure(node_id: &str, error: &HookError) -> Self {
        Self::new(
            names::HOOK_FAILURE,
            InspectType::Warning,
            node_id,
            "Custom template failed",
            format!("{}; default output was used", error),
        )
        .with_chinese_name("模板异常")
        .with_color("#fc8800")
    }

    pub fn flattened_children(node_id: &str, dropped: usize) -> Self {
        Self::new(
            names::FLATTENED_CHILDREN,
            InspectType::Info,
            node_id,
            "Layer exported as image",
            format!("{} child layer(s) are part of the image asset", dropped),
        )
        .with_chinese_name("图层合并")
        .with_color("#0064fa")
    }
}

/// Findings in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<D2CInspect>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: D2CInspect) {
        self.0.push(finding);
    }

    /// Appends `other` after the findings already collected.
    pub fn merge(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &D2CInspect> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count(&self, inspect_type: InspectType) -> usize {
        self.0.iter().filter(|f| f.inspect_type == inspect_type).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(InspectType::Error) > 0
    }

    /// Findings per node id, in discovery order.
    pub fn by_node(&self) -> BTreeMap<&str, Vec<&D2CInspect>> {
        let mut index: BTreeMap<&str, Vec<&D2CInspect>> = BTreeMap::new();
        for finding in &self.0 {
            for id in &finding.node_ids {
                index.entry(id.as_str()).or_default().push(finding);
            }
        }
        index
    }

    pub fn into_vec(self) -> Vec<D2CInspect> {
        self.0
    }
}

impl Extend<D2CInspect> for Diagnostics {
    fn extend<I: IntoIterator<Item = D2CInspect>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<D2CInspect> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = D2CInspect>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Diagnostics {
    type Item = D2CInspect;
    type IntoIter = std::vec::IntoIter<D2CInspect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// What to do with a finding whose node ids do not each name exactly one
/// node in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Fail with [`D2cError::UnresolvedFinding`].
    Strict,
    /// Drop the finding and log it.
    #[default]
    Lenient,
}

impl FromStr for BoundaryMode {
    type Err = D2cError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(BoundaryMode::Strict),
            "lenient" => Ok(BoundaryMode::Lenient),
            other => Err(D2cError::config(format!(
                "Unknown boundary mode '{}' (expected strict or lenient)",
                other
            ))),
        }
    }
}

/// Checks every finding's node ids against `tree`. An id carried by no
/// node, or by more than one, is unresolved.
pub fn resolve_findings(
    findings: Diagnostics,
    tree: &TreeNode,
    mode: BoundaryMode,
) -> Result<Diagnostics> {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for id in tree.ids() {
        *occurrences.entry(id).or_default() += 1;
    }
    for (id, count) in &occurrences {
        if *count > 1 {
            log::warn!("node id '{}' appears {} times in the tree", id, count);
        }
    }
    let mut resolved = Diagnostics::new();

    for finding in findings {
        // an id resolves only when exactly one node carries it
        let mut missing: Vec<String> = finding
            .node_ids
            .iter()
            .filter(|id| occurrences.get(id.as_str()) != Some(&1))
            .cloned()
            .collect();
        if finding.node_ids.is_empty() {
            missing.push("(none)".to_string());
        }
        if missing.is_empty() {
            resolved.push(finding);
            continue;
        }
        match mode {
            BoundaryMode::Strict => {
                return Err(D2cError::UnresolvedFinding {
                    inspect_name: finding.inspect_name,
                    missing,
                })
            }
            BoundaryMode::Lenient => {
                log::warn!(
                    "dropping finding '{}': unresolved node ids {}",
                    finding.inspect_name,
                    missing.join(", ")
                );
            }
        }
    }
    Ok(resolved)
}
