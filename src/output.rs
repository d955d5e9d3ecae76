use serde::Serialize;
use std::path::PathBuf;

use crate::config::GlobalSetting;
use crate::dependency::ImportsType;
use crate::error::ErrorPayload;
use crate::inspect::Diagnostics;
use crate::node::TreeNode;
use crate::sandbox::{SandboxParams, SandboxTemplate};

/// Schema version for output payloads.
pub const D2C_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum D2cOutput {
    Transform(TransformReport),
    Render(RenderReport),
    Export(ExportReport),
    Error(ErrorReport),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl From<&Diagnostics> for FindingCounts {
    fn from(diagnostics: &Diagnostics) -> Self {
        use crate::inspect::InspectType;
        Self {
            info: diagnostics.count(InspectType::Info),
            warning: diagnostics.count(InspectType::Warning),
            error: diagnostics.count(InspectType::Error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformReport {
    pub version: String,
    pub input: PathBuf,
    pub setting: GlobalSetting,
    pub node_count: usize,
    pub counts: FindingCounts,
    pub tree: TreeNode,
    pub imports: ImportsType,
    pub findings: Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub version: String,
    pub input: PathBuf,
    pub setting: GlobalSetting,
    pub counts: FindingCounts,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    pub findings: Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReport {
    pub version: String,
    pub input: PathBuf,
    pub setting: GlobalSetting,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<SandboxTemplate>,
    pub file_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub written: Vec<PathBuf>,
    /// Present when the params were not written to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<SandboxParams>,
    pub findings: Diagnostics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub version: String,
    pub error: ErrorPayload,
}

impl ErrorReport {
    pub fn new(error: ErrorPayload) -> Self {
        Self {
            version: D2C_OUTPUT_VERSION.to_string(),
            error,
        }
    }
}
