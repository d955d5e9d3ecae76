//! Dependency records and import aggregation.
//!
//! A [`Dependency`] is identified by `(componentName, packageName)`. Per node
//! they live in a [`DependencySet`]; across a tree they are aggregated into an
//! [`ImportsType`] map from which one import statement per package is emitted.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::node::TreeNode;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub component_name: String,
    pub package_name: String,
    /// Default import (`import X from`) rather than a named one.
    #[serde(default)]
    pub default_module: bool,
}

impl Dependency {
    pub fn new(
        component_name: impl Into<String>,
        package_name: impl Into<String>,
        default_module: bool,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            package_name: package_name.into(),
            default_module,
        }
    }

    pub fn key(&self) -> DependencyKey {
        DependencyKey {
            package_name: self.package_name.clone(),
            component_name: self.component_name.clone(),
        }
    }
}

/// Identity of a dependency. Orders by package, then component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyKey {
    pub package_name: String,
    pub component_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
    /// Same identity, different import kind; the existing entry is kept.
    Conflict { kept_default: bool },
}

/// Insertion-ordered dependencies of one node, unique by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Dependency>", into = "Vec<Dependency>")]
pub struct DependencySet {
    entries: IndexMap<DependencyKey, Dependency>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// First occurrence wins.
    pub fn insert(&mut self, dependency: Dependency) -> InsertOutcome {
        match self.entries.get(&dependency.key()) {
            Some(existing) if existing.default_module == dependency.default_module => {
                InsertOutcome::Duplicate
            }
            Some(existing) => InsertOutcome::Conflict {
                kept_default: existing.default_module,
            },
            None => {
                self.entries.insert(dependency.key(), dependency);
                InsertOutcome::Inserted
            }
        }
    }

    pub fn get(&self, component_name: &str, package_name: &str) -> Option<&Dependency> {
        self.entries.get(&DependencyKey {
            package_name: package_name.to_string(),
            component_name: component_name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Dependency>> for DependencySet {
    fn from(list: Vec<Dependency>) -> Self {
        let mut set = DependencySet::new();
        for dependency in list {
            let (name, package) = (dependency.component_name.clone(), dependency.package_name.clone());
            if let InsertOutcome::Conflict { kept_default } = set.insert(dependency) {
                log::warn!(
                    "dependency '{}' from '{}' is listed as both a default and a named import; keeping the {} import",
                    name,
                    package,
                    if kept_default { "default" } else { "named" }
                );
            }
        }
        set
    }
}

impl From<DependencySet> for Vec<Dependency> {
    fn from(set: DependencySet) -> Self {
        set.entries.into_values().collect()
    }
}

impl FromIterator<Dependency> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Dependency>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

/// One imported binding of a package.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpec {
    pub name: String,
    #[serde(default)]
    pub default_module: bool,
}

/// Package name to its imported bindings. Packages and bindings are sorted so
/// the map does not depend on traversal order.
pub type ImportsType = BTreeMap<String, Vec<ImportSpec>>;

/// Two nodes claimed the same dependency with different import kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyConflict {
    pub component_name: String,
    pub package_name: String,
    pub kept_default: bool,
    /// The first claiming node followed by every conflicting one.
    pub node_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub imports: ImportsType,
    pub conflicts: Vec<DependencyConflict>,
}

struct Claim {
    default_module: bool,
    first_node: Option<String>,
    conflicting_nodes: Vec<String>,
    conflicted: bool,
}

/// Collect every dependency reachable from `root` (children and node-valued
/// props) into an [`ImportsType`].
///
/// Conflicting import kinds keep the first occurrence in pre-order and are
/// returned as [`DependencyConflict`]s for the caller to report.
pub fn aggregate_imports(root: &TreeNode) -> Aggregation {
    let mut claims: BTreeMap<DependencyKey, Claim> = BTreeMap::new();

    root.visit(&mut |node| {
        for dependency in node.dependencies.iter() {
            let claim = claims.entry(dependency.key()).or_insert_with(|| Claim {
                default_module: dependency.default_module,
                first_node: node.id.clone(),
                conflicting_nodes: Vec::new(),
                conflicted: false,
            });
            if claim.default_module != dependency.default_module {
                claim.conflicted = true;
                if let Some(id) = &node.id {
                    claim.conflicting_nodes.push(id.clone());
                }
            }
        }
    });

    let mut aggregation = Aggregation::default();
    for (key, claim) in claims {
        aggregation
            .imports
            .entry(key.package_name.clone())
            .or_default()
            .push(ImportSpec {
                name: key.component_name.clone(),
                default_module: claim.default_module,
            });
        if claim.conflicted {
            let node_ids = claim
                .first_node
                .into_iter()
                .chain(claim.conflicting_nodes)
                .collect();
            aggregation.conflicts.push(DependencyConflict {
                component_name: key.component_name,
                package_name: key.package_name,
                kept_default: claim.default_module,
                node_ids,
            });
        }
    }
    for specs in aggregation.imports.values_mut() {
        specs.sort();
    }
    aggregation
}

/// Render one import statement per package.
///
/// ```text
/// import Default, { Named, Other } from 'package';
/// ```
pub fn render_imports(imports: &ImportsType) -> String {
    let mut lines = Vec::new();
    for (package, specs) in imports {
        let defaults: Vec<&str> = specs
            .iter()
            .filter(|s| s.default_module)
            .map(|s| s.name.as_str())
            .collect();
        let named: Vec<&str> = specs
            .iter()
            .filter(|s| !s.default_module)
            .map(|s| s.name.as_str())
            .collect();

        let mut clause = Vec::new();
        if let Some(first) = defaults.first() {
            clause.push(first.to_string());
        }
        if !named.is_empty() {
            clause.push(format!("{{ {} }}", named.join(", ")));
        }
        if !clause.is_empty() {
            lines.push(format!("import {} from '{}';", clause.join(", "), package));
        }
        // a module has a single default export; extra default bindings get their own line
        for extra in defaults.iter().skip(1) {
            lines.push(format!("import {} from '{}';", extra, package));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEMI: &str = "@douyinfe/semi-ui";

    fn component(id: &str, name: &str, default_module: bool) -> TreeNode {
        TreeNode::element(name, name, "INSTANCE")
            .with_id(id)
            .with_component(SEMI, default_module)
    }

    #[test]
    fn set_deduplicates_by_identity() {
        let mut set = DependencySet::new();
        assert_eq!(
            set.insert(Dependency::new("Button", SEMI, false)),
            InsertOutcome::Inserted
        );
        assert_eq!(
            set.insert(Dependency::new("Button", SEMI, false)),
            InsertOutcome::Duplicate
        );
        assert_eq!(
            set.insert(Dependency::new("Button", SEMI, true)),
            InsertOutcome::Conflict {
                kept_default: false
            }
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn set_serializes_as_array() {
        let set: DependencySet = vec![
            Dependency::new("Button", SEMI, false),
            Dependency::new("Button", SEMI, false),
        ]
        .into();
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"componentName":"Button","packageName":SEMI,"defaultModule":false}])
        );
    }

    #[test]
    fn deserialized_conflicts_keep_the_first_kind() {
        let set: DependencySet = serde_json::from_value(serde_json::json!([
            {"componentName": "Modal", "packageName": SEMI, "defaultModule": true},
            {"componentName": "Modal", "packageName": SEMI, "defaultModule": false}
        ]))
        .unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get("Modal", SEMI).unwrap().default_module);
    }

    #[test]
    fn siblings_share_one_import() {
        let root = TreeNode::element("div", "Root", "FRAME")
            .with_id("0:1")
            .with_children(vec![
                component("1:1", "Button", false),
                component("1:2", "Button", false),
            ]);
        let aggregation = aggregate_imports(&root);
        assert!(aggregation.conflicts.is_empty());
        assert_eq!(aggregation.imports.len(), 1);
        assert_eq!(
            aggregation.imports[SEMI],
            vec![ImportSpec {
                name: "Button".to_string(),
                default_module: false
            }]
        );
    }

    #[test]
    fn conflicting_kinds_keep_first_and_report() {
        let root = TreeNode::element("div", "Root", "FRAME")
            .with_id("0:1")
            .with_children(vec![
                component("1:1", "Button", false),
                component("1:2", "Button", true),
            ]);
        let aggregation = aggregate_imports(&root);
        assert!(!aggregation.imports[SEMI][0].default_module);
        assert_eq!(aggregation.conflicts.len(), 1);
        assert_eq!(aggregation.conflicts[0].node_ids, vec!["1:1", "1:2"]);
    }

    #[test]
    fn render_imports_merges_default_and_named() {
        let mut imports = ImportsType::new();
        imports.insert(
            SEMI.to_string(),
            vec![
                ImportSpec {
                    name: "Button".to_string(),
                    default_module: false,
                },
                ImportSpec {
                    name: "Semi".to_string(),
                    default_module: true,
                },
                ImportSpec {
                    name: "Tag".to_string(),
                    default_module: false,
                },
            ],
        );
        imports.insert(
            "./Logo".to_string(),
            vec![ImportSpec {
                name: "Logo".to_string(),
                default_module: true,
            }],
        );
        let rendered = render_imports(&imports);
        assert_eq!(
            rendered,
            "import Logo from './Logo';\nimport Semi, { Button, Tag } from '@douyinfe/semi-ui';"
        );
    }
}
