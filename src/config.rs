use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inspect::BoundaryMode;
use crate::{D2cError, Result};

/// Which backend renderer consumes the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformMode {
    #[default]
    #[serde(rename = "jsx+scss")]
    JsxScss,
    #[serde(rename = "jsx+tailwind")]
    JsxTailwind,
    #[serde(rename = "jsx+emotion")]
    JsxEmotion,
}

impl TransformMode {
    pub const ALL: [TransformMode; 3] = [
        TransformMode::JsxScss,
        TransformMode::JsxTailwind,
        TransformMode::JsxEmotion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransformMode::JsxScss => "jsx+scss",
            TransformMode::JsxTailwind => "jsx+tailwind",
            TransformMode::JsxEmotion => "jsx+emotion",
        }
    }

    /// Packages the generated project needs at runtime for this mode.
    pub fn runtime_packages(self) -> &'static [(&'static str, &'static str)] {
        match self {
            TransformMode::JsxScss => &[("sass", "^1.69.0")],
            TransformMode::JsxTailwind => &[("tailwindcss", "^3.4.0")],
            TransformMode::JsxEmotion => &[("@emotion/react", "^11.11.0")],
        }
    }
}

impl fmt::Display for TransformMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transform mode '{0}' (expected jsx+scss, jsx+tailwind or jsx+emotion)")]
pub struct TransformModeParseError(String);

impl From<TransformModeParseError> for D2cError {
    fn from(err: TransformModeParseError) -> Self {
        D2cError::Config(err.to_string())
    }
}

impl FromStr for TransformMode {
    type Err = TransformModeParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TransformMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TransformModeParseError(s.to_string()))
    }
}

/// Process-wide transform configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSetting {
    pub transform_mode: TransformMode,
}

/// Maps a design component to an importable one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentMapping {
    /// Design component name as it appears on `INSTANCE` nodes.
    pub component: String,
    pub package: String,
    /// Exported binding; defaults to `component`.
    #[serde(default)]
    pub export: Option<String>,
    #[serde(default)]
    pub default_module: bool,
}

impl ComponentMapping {
    pub fn new(component: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            package: package.into(),
            export: None,
            default_module: false,
        }
    }

    pub fn export_name(&self) -> &str {
        self.export.as_deref().unwrap_or(&self.component)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub title: Option<String>,
    pub description: Option<String>,
    pub template: Option<String>,
    /// Package version pins for the generated `package.json`.
    pub versions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transform_mode: TransformMode,
    pub drop_invisible: bool,
    pub parallel: bool,
    pub boundary: BoundaryMode,
    pub components: Vec<ComponentMapping>,
    pub sandbox: SandboxConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transform_mode: TransformMode::default(),
            drop_invisible: true,
            parallel: false,
            boundary: BoundaryMode::default(),
            components: Vec::new(),
            sandbox: SandboxConfig::default(),
        }
    }
}

impl Config {
    /// `$HOME/.config/d2c/config.toml`
    pub fn central_config_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|home| home.join(".config").join("d2c").join("config.toml"))
    }

    /// Priority: explicit path > central config > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::central_config_path() {
            Some(central) if central.is_file() => Self::from_file(&central),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg = Self::from_toml(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| D2cError::config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for mapping in &self.components {
            if mapping.component.trim().is_empty() {
                return Err(D2cError::config("component mapping has an empty component name"));
            }
            if mapping.package.trim().is_empty() {
                return Err(D2cError::config(format!(
                    "component mapping '{}' has an empty package",
                    mapping.component
                )));
            }
            if mapping.export.as_deref().is_some_and(|e| e.trim().is_empty()) {
                return Err(D2cError::config(format!(
                    "component mapping '{}' has an empty export",
                    mapping.component
                )));
            }
            if !seen.insert(mapping.component.as_str()) {
                return Err(D2cError::config(format!(
                    "component mapping '{}' appears more than once",
                    mapping.component
                )));
            }
        }
        Ok(())
    }

    pub fn global_setting(&self) -> GlobalSetting {
        GlobalSetting {
            transform_mode: self.transform_mode,
        }
    }
}
