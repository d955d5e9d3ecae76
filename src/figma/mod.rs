//! Raw design-tool input boundary.
//!
//! This module provides:
//! - [`RawNode`] and its paint/effect/type-style parts
//! - [`load_raw_tree`] - read a walker dump from a JSON or YAML file
//! - [`parse_raw_tree`] - parse an in-memory dump

pub mod api_types;

#[cfg(test)]
mod tests;

pub use api_types::{
    RawBoundingBox, RawColor, RawColorStop, RawComponentProperty, RawEffect, RawNode, RawPaint,
    RawStrokeWeights, RawTypeStyle, RawVector,
};

use crate::{D2cError, Result};
use std::path::Path;

/// Serialization of a raw tree dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawFormat {
    Json,
    Yaml,
}

impl RawFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(RawFormat::Json),
            "yaml" | "yml" => Ok(RawFormat::Yaml),
            other => Err(D2cError::config(format!(
                "Unsupported input extension '{}' for {}",
                other,
                path.display()
            ))),
        }
    }
}

/// Parse a raw node tree. A `{"document": {...}}` wrapper, as returned by the
/// nodes endpoint, is unwrapped.
pub fn parse_raw_tree(content: &str, format: RawFormat) -> Result<RawNode> {
    let value: serde_json::Value = match format {
        RawFormat::Json => serde_json::from_str(content)?,
        RawFormat::Yaml => serde_yaml::from_str(content)?,
    };
    let value = match value {
        serde_json::Value::Object(mut map) if map.contains_key("document") => map
            .remove("document")
            .unwrap_or(serde_json::Value::Null),
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a raw node tree from disk.
pub fn load_raw_tree(path: &Path) -> Result<RawNode> {
    let format = RawFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    log::debug!("loaded raw tree from {} ({:?})", path.display(), format);
    parse_raw_tree(&content, format)
}
