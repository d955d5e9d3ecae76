//! Per-node code emission overrides.
//!
//! A node carries a [`TemplateBinding`]: either no override, or a
//! [`HookHandle`] naming a hook. The renderer resolves handles through a
//! [`HookRegistry`] it owns, so the tree itself stays plain serializable data.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::TreeNode;

/// Opaque name of a registered hook.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HookHandle(String);

impl HookHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateBinding {
    #[default]
    NoOverride,
    Override(HookHandle),
}

impl TemplateBinding {
    pub fn handle(&self) -> Option<&HookHandle> {
        match self {
            TemplateBinding::NoOverride => None,
            TemplateBinding::Override(handle) => Some(handle),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, TemplateBinding::Override(_))
    }
}

impl From<Option<HookHandle>> for TemplateBinding {
    fn from(handle: Option<HookHandle>) -> Self {
        handle.map_or(TemplateBinding::NoOverride, TemplateBinding::Override)
    }
}

/// The renderer surface exposed to hooks.
pub trait GenerationHooks {
    /// Default serialization of `node`, ignoring `node`'s own override.
    /// Descendants are still rendered through their hooks.
    fn generate_template(&self, node: &TreeNode) -> String;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("hook '{0}' is not registered")]
    Unregistered(HookHandle),
    #[error("hook '{handle}' failed: {message}")]
    Failed { handle: HookHandle, message: String },
    #[error("hook '{0}' panicked")]
    Panicked(HookHandle),
}

impl HookError {
    pub fn failed(handle: &HookHandle, message: impl Into<String>) -> Self {
        HookError::Failed {
            handle: handle.clone(),
            message: message.into(),
        }
    }
}

/// A custom emission hook. Returns the source fragment for the node's
/// position in the output; the renderer splices it in verbatim.
pub trait TemplateHook: Send + Sync {
    fn to_template(
        &self,
        node: &TreeNode,
        hooks: &dyn GenerationHooks,
    ) -> Result<String, String>;
}

impl<F> TemplateHook for F
where
    F: Fn(&TreeNode, &dyn GenerationHooks) -> Result<String, String> + Send + Sync,
{
    fn to_template(
        &self,
        node: &TreeNode,
        hooks: &dyn GenerationHooks,
    ) -> Result<String, String> {
        self(node, hooks)
    }
}

/// Resolves [`HookHandle`]s to hooks at render time.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<HookHandle, Box<dyn TemplateHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` under `name`, replacing any previous hook.
    pub fn register(&mut self, name: impl Into<String>, hook: impl TemplateHook + 'static) -> HookHandle {
        let handle = HookHandle::new(name);
        self.hooks.insert(handle.clone(), Box::new(hook));
        handle
    }

    pub fn resolve(&self, handle: &HookHandle) -> Result<&dyn TemplateHook, HookError> {
        self.hooks
            .get(handle)
            .map(|hook| hook.as_ref())
            .ok_or_else(|| HookError::Unregistered(handle.clone()))
    }

    pub fn contains(&self, handle: &HookHandle) -> bool {
        self.hooks.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.hooks.keys().map(HookHandle::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}
