use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum D2cError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid tree: {0}")]
    InvalidTree(String),

    #[error("Finding '{inspect_name}' references unresolved node ids: {}", missing.join(", "))]
    UnresolvedFinding {
        inspect_name: String,
        missing: Vec<String>,
    },

    #[error("Sandbox export error: {0}")]
    SandboxExport(String),
}

impl D2cError {
    pub fn config(message: impl Into<String>) -> Self {
        D2cError::Config(message.into())
    }

    pub fn sandbox(message: impl Into<String>) -> Self {
        D2cError::SandboxExport(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            D2cError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            D2cError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check that the input is a design node tree in JSON form (id, name, type, children).",
            ),
            D2cError::Yaml(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check YAML indentation and that the document is a single node tree.",
            ),
            D2cError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Sandbox,
                e.to_string(),
                "Asset references must be absolute URLs (e.g., https://cdn.example.com/a.png).",
            ),
            D2cError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("transform mode") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use one of: jsx+scss, jsx+tailwind, jsx+emotion.",
                    )
                } else if lower.contains("component mapping") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Each [[components]] entry needs non-empty component, package and export fields.",
                    )
                } else if lower.contains("unsupported input extension") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a .json, .yaml or .yml design tree file.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and the config file (--config).",
                    )
                }
            }
            D2cError::InvalidTree(msg) => ErrorPayload::new(
                ErrorCategory::Tree,
                msg.to_string(),
                "The transformed tree broke an IR invariant; re-run with --verbose and report the input.",
            ),
            D2cError::UnresolvedFinding { .. } => ErrorPayload::new(
                ErrorCategory::Tree,
                self.to_string(),
                "A transformation pass produced a finding for a node id that is missing from the tree or shared by several nodes; use boundary = \"lenient\" to drop it.",
            ),
            D2cError::SandboxExport(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("template") {
                    ErrorPayload::new(
                        ErrorCategory::Sandbox,
                        msg.to_string(),
                        "Use a supported sandbox template (e.g., create-react-app, parcel, static).",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Sandbox,
                        msg.to_string(),
                        "Check the sandbox file map and the output path.",
                    )
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, D2cError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Io,
    Input,
    Tree,
    Sandbox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
