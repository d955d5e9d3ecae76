//! Design-to-code (D2C) Library
//!
//! An intermediate representation between a design document and generated
//! front-end code. Raw design nodes are mapped into a tree of [`TreeNode`]s
//! carrying faceted styles, component dependencies and optional template
//! hooks; the tree is then serialized to JSX or packaged as a sandbox.
//!
//! # Module Overview
//!
//! - [`figma`] - Raw design node input (JSON/YAML walker dumps)
//! - [`style`] - The eight style facets and raw-to-CSS resolution
//! - [`node`] - The [`TreeNode`] IR and its invariants
//! - [`dependency`] - Component dependencies and import aggregation
//! - [`transform`] - Raw tree to IR transformation
//! - [`template`] - Template hook contract and registry
//! - [`render`] - JSX serialization honoring hooks
//! - [`inspect`] - Diagnostics attached to nodes
//! - [`sandbox`] - Online sandbox export
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use d2c_lib::{load_raw_tree, transform_document, Config};
//! use d2c_lib::{render_module, HookRegistry, InlineStyleEmitter, TemplateRenderer};
//!
//! # fn example() -> d2c_lib::Result<()> {
//! let raw = load_raw_tree(std::path::Path::new("design.json"))?;
//! let output = transform_document(&raw, &Config::default())?;
//! let tree = output.tree.freeze()?;
//!
//! let registry = HookRegistry::new();
//! let renderer = TemplateRenderer::new(&registry, &InlineStyleEmitter);
//! let module = render_module(&renderer, &tree, &output.imports, "App");
//! println!("{}", module.source);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod figma;
pub mod inspect;
pub mod logging;
pub mod node;
pub mod output;
pub mod render;
pub mod sandbox;
pub mod style;
pub mod template;
pub mod transform;

pub use config::{ComponentMapping, Config, GlobalSetting, SandboxConfig, TransformMode};
pub use dependency::{
    aggregate_imports, render_imports, Aggregation, Dependency, DependencyConflict,
    DependencySet, ImportSpec, ImportsType,
};
pub use error::{D2cError, ErrorCategory, ErrorPayload, Result};
pub use figma::{load_raw_tree, parse_raw_tree, RawFormat, RawNode};
pub use inspect::{resolve_findings, BoundaryMode, D2CInspect, Diagnostics, InspectType};
pub use logging::{init_logging, LoggingConfig};
pub use node::{FrozenTree, NodeContent, NodeViolation, PropValue, Props, TreeNode};
pub use output::{
    D2cOutput, ErrorReport, ExportReport, FindingCounts, RenderReport, TransformReport,
    D2C_OUTPUT_VERSION,
};
pub use render::{
    render_module, InlineStyleEmitter, Rendered, RenderedModule, StyleEmitter, TemplateRenderer,
};
pub use sandbox::{SandboxBuilder, SandboxFile, SandboxParams, SandboxTemplate};
pub use style::{Facet, TreeNodeStyle};
pub use template::{
    GenerationHooks, HookError, HookHandle, HookRegistry, TemplateBinding, TemplateHook,
};
pub use transform::{
    transform_document, transform_with, TransformOptions, TransformOutput, Transformer,
};
