//! Sandbox project export.
//!
//! [`SandboxBuilder`] turns a rendered module into [`SandboxParams`], the
//! path-to-file map a sandbox service accepts. Binary files carry a URL as
//! their content; the service downloads them.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use futures::future::try_join_all;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::config::{SandboxConfig, TransformMode};
use crate::dependency::ImportsType;
use crate::node::TreeNode;
use crate::render::RenderedModule;
use crate::transform::asset_slug;
use crate::{D2cError, Result};

const BINARY_EXTENSIONS: [&str; 12] = [
    "png", "jpg", "jpeg", "gif", "webp", "avif", "ico", "bmp", "woff", "woff2", "ttf", "otf",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxFile {
    pub content: String,
    pub is_binary: bool,
}

impl SandboxFile {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_binary: false,
        }
    }

    pub fn binary(url: impl Into<String>) -> Self {
        Self {
            content: url.into(),
            is_binary: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SandboxTemplate {
    #[serde(rename = "@dojo/cli-create-app")]
    DojoCliCreateApp,
    #[serde(rename = "angular-cli")]
    AngularCli,
    #[serde(rename = "create-react-app")]
    CreateReactApp,
    #[serde(rename = "cxjs")]
    Cxjs,
    #[serde(rename = "docusaurus")]
    Docusaurus,
    #[serde(rename = "parcel")]
    Parcel,
    #[serde(rename = "preact-cli")]
    PreactCli,
    #[serde(rename = "reason")]
    Reason,
    #[serde(rename = "static")]
    Static,
    #[serde(rename = "svelte")]
    Svelte,
    #[serde(rename = "vue-cli")]
    VueCli,
}

impl SandboxTemplate {
    pub const ALL: [SandboxTemplate; 11] = [
        SandboxTemplate::DojoCliCreateApp,
        SandboxTemplate::AngularCli,
        SandboxTemplate::CreateReactApp,
        SandboxTemplate::Cxjs,
        SandboxTemplate::Docusaurus,
        SandboxTemplate::Parcel,
        SandboxTemplate::PreactCli,
        SandboxTemplate::Reason,
        SandboxTemplate::Static,
        SandboxTemplate::Svelte,
        SandboxTemplate::VueCli,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SandboxTemplate::DojoCliCreateApp => "@dojo/cli-create-app",
            SandboxTemplate::AngularCli => "angular-cli",
            SandboxTemplate::CreateReactApp => "create-react-app",
            SandboxTemplate::Cxjs => "cxjs",
            SandboxTemplate::Docusaurus => "docusaurus",
            SandboxTemplate::Parcel => "parcel",
            SandboxTemplate::PreactCli => "preact-cli",
            SandboxTemplate::Reason => "reason",
            SandboxTemplate::Static => "static",
            SandboxTemplate::Svelte => "svelte",
            SandboxTemplate::VueCli => "vue-cli",
        }
    }
}

impl fmt::Display for SandboxTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sandbox template '{0}'")]
pub struct SandboxTemplateParseError(String);

impl From<SandboxTemplateParseError> for D2cError {
    fn from(err: SandboxTemplateParseError) -> Self {
        D2cError::SandboxExport(err.to_string())
    }
}

impl FromStr for SandboxTemplate {
    type Err = SandboxTemplateParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SandboxTemplate::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| SandboxTemplateParseError(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxParams {
    pub files: BTreeMap<String, SandboxFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<SandboxTemplate>,
}

impl SandboxParams {
    pub fn validate(&self) -> Result<()> {
        for (path, file) in &self.files {
            validate_path(path)?;
            let binary_ext = extension(path).is_some_and(|ext| BINARY_EXTENSIONS.contains(&ext.as_str()));
            if binary_ext && !file.is_binary {
                return Err(D2cError::sandbox(format!(
                    "{} is a binary asset but is not flagged isBinary",
                    path
                )));
            }
            if file.is_binary {
                let url = Url::parse(&file.content)?;
                if !matches!(url.scheme(), "http" | "https") {
                    return Err(D2cError::sandbox(format!(
                        "{} must point at an http(s) URL, got {}",
                        path, url
                    )));
                }
            }
        }
        Ok(())
    }

    /// Writes the params as pretty JSON, creating parent directories.
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        log::debug!("wrote sandbox params to {}", path.display());
        Ok(())
    }

    /// Writes every text file under `dir`. Binary files stay remote.
    pub async fn materialize(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        self.validate()?;
        let writes = self
            .files
            .iter()
            .filter(|(path, file)| {
                if file.is_binary {
                    log::debug!("skipping remote asset {} ({})", path, file.content);
                }
                !file.is_binary
            })
            .map(|(path, file)| {
                let target = dir.join(path);
                async move {
                    if let Some(parent) = target.parent() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                    tokio::fs::write(&target, &file.content).await?;
                    Ok::<PathBuf, D2cError>(target)
                }
            });
        let written = try_join_all(writes).await?;
        log::debug!("materialized {} files into {}", written.len(), dir.display());
        Ok(written)
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(D2cError::sandbox("empty file path"));
    }
    if path.contains('\\') {
        return Err(D2cError::sandbox(format!("{} must use forward slashes", path)));
    }
    let relative = Path::new(path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !relative {
        return Err(D2cError::sandbox(format!(
            "{} must be a relative path without '..'",
            path
        )));
    }
    Ok(())
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

const REACT_VERSION: &str = "^18.2.0";

/// Assembles a runnable React project around a rendered module.
#[derive(Debug, Clone)]
pub struct SandboxBuilder {
    mode: TransformMode,
    title: Option<String>,
    description: Option<String>,
    template: SandboxTemplate,
    versions: BTreeMap<String, String>,
}

impl SandboxBuilder {
    pub fn new(mode: TransformMode) -> Self {
        Self {
            mode,
            title: None,
            description: None,
            template: SandboxTemplate::CreateReactApp,
            versions: BTreeMap::new(),
        }
    }

    /// Applies the `[sandbox]` config table.
    pub fn from_config(mode: TransformMode, config: &SandboxConfig) -> Result<Self> {
        let mut builder = Self::new(mode);
        builder.title = config.title.clone();
        builder.description = config.description.clone();
        builder.versions = config.versions.clone();
        if let Some(template) = &config.template {
            builder.template = template.parse()?;
        }
        Ok(builder)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn template(mut self, template: SandboxTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn build(
        &self,
        module: &RenderedModule,
        imports: &ImportsType,
        tree: &TreeNode,
    ) -> Result<SandboxParams> {
        let mut files = BTreeMap::new();
        files.insert(
            "package.json".to_string(),
            SandboxFile::text(self.package_json(imports)?),
        );
        let assets = remote_assets(tree);
        files.insert(
            "src/App.jsx".to_string(),
            SandboxFile::text(point_at_bundled(&module.source, &assets)),
        );
        files.insert("src/index.jsx".to_string(), SandboxFile::text(INDEX_JSX));
        files.insert(
            "public/index.html".to_string(),
            SandboxFile::text(index_html(self.title.as_deref().unwrap_or("D2C Preview"))),
        );
        for (url, path) in assets {
            files.insert(path, SandboxFile::binary(url));
        }

        let params = SandboxParams {
            files,
            title: self.title.clone(),
            description: self.description.clone(),
            template: Some(self.template),
        };
        params.validate()?;
        Ok(params)
    }

    fn package_json(&self, imports: &ImportsType) -> Result<String> {
        let mut dependencies = BTreeMap::new();
        dependencies.insert("react".to_string(), REACT_VERSION.to_string());
        dependencies.insert("react-dom".to_string(), REACT_VERSION.to_string());
        dependencies.insert("react-scripts".to_string(), "5.0.1".to_string());
        for (package, version) in self.mode.runtime_packages() {
            dependencies.insert(package.to_string(), version.to_string());
        }
        for package in imports.keys().filter(|p| !is_local_module(p)) {
            dependencies.insert(package.clone(), "latest".to_string());
        }
        for (package, version) in &self.versions {
            if dependencies.contains_key(package) {
                dependencies.insert(package.clone(), version.clone());
            }
        }

        let manifest = serde_json::json!({
            "name": "d2c-sandbox",
            "version": "0.0.0",
            "private": true,
            "main": "src/index.jsx",
            "dependencies": dependencies,
            "scripts": {
                "start": "react-scripts start",
                "build": "react-scripts build"
            }
        });
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

fn is_local_module(package: &str) -> bool {
    package.starts_with('.') || package.starts_with('/')
}

/// Bundled file path by remote asset URL. The first node in pre-order to
/// use a URL names its file, `public/assets/<node>.<ext>`; a name already
/// taken gets a numeric suffix.
fn remote_assets(tree: &TreeNode) -> IndexMap<String, String> {
    let mut assets: IndexMap<String, String> = IndexMap::new();
    let mut taken = HashSet::new();
    tree.visit(&mut |node| {
        let Some(asset) = node.asset() else { return };
        if assets.contains_key(asset) {
            return;
        }
        match Url::parse(asset) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                let ext = url
                    .path_segments()
                    .and_then(|segments| segments.last())
                    .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()))
                    .filter(|ext| !ext.is_empty())
                    .unwrap_or_else(|| "png".to_string());
                let id = node.id.as_deref().unwrap_or(node.name.as_str());
                let mut stem = asset_slug(id);
                if stem.is_empty() {
                    stem = "asset".to_string();
                }
                let mut path = format!("public/assets/{}.{}", stem, ext);
                let mut suffix = 2;
                while !taken.insert(path.clone()) {
                    path = format!("public/assets/{}-{}.{}", stem, suffix, ext);
                    suffix += 1;
                }
                if suffix > 2 {
                    log::warn!("asset name for {} was taken; bundled as {}", asset, path);
                }
                assets.insert(asset.to_string(), path);
            }
            _ => log::warn!("asset '{}' is not a remote URL; not bundled", asset),
        }
    });
    assets
}

/// Rewrites remote asset URLs in `source` to their bundled copies. Files
/// under `public/` are served from the site root.
fn point_at_bundled(source: &str, assets: &IndexMap<String, String>) -> String {
    let mut by_length: Vec<(&String, &String)> = assets.iter().collect();
    // a URL may prefix another one
    by_length.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    let mut out = source.to_string();
    for (url, path) in by_length {
        let served = path.strip_prefix("public").unwrap_or(path);
        out = out.replace(url.as_str(), served);
    }
    out
}

const INDEX_JSX: &str = r#"import React from 'react';
import { createRoot } from 'react-dom/client';
import App from './App';

createRoot(document.getElementById('root')).render(<App />);
"#;

fn index_html(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>{}</title>\n  </head>\n  <body>\n    <div id=\"root\"></div>\n  </body>\n</html>\n",
        title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::ImportSpec;
    use crate::inspect::Diagnostics;

    fn module() -> RenderedModule {
        RenderedModule {
            source: "export default function App() {\n  return (\n    <div />\n  );\n}\n".to_string(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn imports() -> ImportsType {
        let mut imports = ImportsType::new();
        imports.insert(
            "@douyinfe/semi-ui".to_string(),
            vec![ImportSpec {
                name: "Button".to_string(),
                default_module: false,
            }],
        );
        imports.insert(
            "./Logo".to_string(),
            vec![ImportSpec {
                name: "Logo".to_string(),
                default_module: true,
            }],
        );
        imports
    }

    fn tree() -> TreeNode {
        TreeNode::element("div", "Page", "FRAME")
            .with_id("0:1")
            .with_children(vec![
                TreeNode::element("img", "Hero", "RECTANGLE")
                    .with_id("1:1")
                    .with_asset("https://cdn.example/hero.JPG?v=2"),
                TreeNode::element("img", "Icon", "VECTOR")
                    .with_id("1:2")
                    .with_asset("assets/1-2.svg"),
            ])
    }

    #[test]
    fn template_ids_parse() {
        assert_eq!(SandboxTemplate::ALL.len(), 11);
        for template in SandboxTemplate::ALL {
            assert_eq!(template.as_str().parse::<SandboxTemplate>(), Ok(template));
        }
        let err: D2cError = "next".parse::<SandboxTemplate>().unwrap_err().into();
        assert!(matches!(err, D2cError::SandboxExport(_)));
    }

    #[test]
    fn builder_assembles_project_files() {
        let params = SandboxBuilder::new(TransformMode::JsxEmotion)
            .title("Card")
            .build(&module(), &imports(), &tree())
            .unwrap();

        assert_eq!(params.template, Some(SandboxTemplate::CreateReactApp));
        assert_eq!(params.title.as_deref(), Some("Card"));
        assert!(params.files.contains_key("src/App.jsx"));
        assert!(params.files.contains_key("src/index.jsx"));
        assert!(params.files["public/index.html"].content.contains("<title>Card</title>"));

        let manifest: serde_json::Value =
            serde_json::from_str(&params.files["package.json"].content).unwrap();
        let deps = &manifest["dependencies"];
        assert_eq!(deps["@douyinfe/semi-ui"], "latest");
        assert_eq!(deps["@emotion/react"], "^11.11.0");
        assert!(deps.get("./Logo").is_none());

        let hero = &params.files["public/assets/1-1.jpg"];
        assert!(hero.is_binary);
        assert_eq!(hero.content, "https://cdn.example/hero.JPG?v=2");
        assert_eq!(params.files.values().filter(|f| f.is_binary).count(), 1);
    }

    #[test]
    fn bundled_assets_are_referenced_and_never_overwritten() {
        let module = RenderedModule {
            source: "<div>\n  <img src=\"https://cdn.example/a.png\" />\n  <img src=\"https://cdn.example/a.png?v=2\" />\n</div>".to_string(),
            diagnostics: Diagnostics::new(),
        };
        let tree = TreeNode::element("div", "Page", "FRAME")
            .with_id("0:1")
            .with_children(vec![
                TreeNode::element("img", "A", "RECTANGLE")
                    .with_id("1:2")
                    .with_asset("https://cdn.example/a.png"),
                TreeNode::element("img", "B", "RECTANGLE")
                    .with_id("1-2")
                    .with_asset("https://cdn.example/a.png?v=2"),
                TreeNode::element("img", "C", "RECTANGLE")
                    .with_id("1:3")
                    .with_asset("https://cdn.example/a.png"),
            ]);
        let params = SandboxBuilder::new(TransformMode::JsxScss)
            .build(&module, &ImportsType::new(), &tree)
            .unwrap();

        assert_eq!(params.files["public/assets/1-2.png"].content, "https://cdn.example/a.png");
        assert_eq!(
            params.files["public/assets/1-2-2.png"].content,
            "https://cdn.example/a.png?v=2"
        );
        assert_eq!(params.files.values().filter(|f| f.is_binary).count(), 2);

        let app = &params.files["src/App.jsx"].content;
        assert!(app.contains("<img src=\"/assets/1-2.png\" />"));
        assert!(app.contains("<img src=\"/assets/1-2-2.png\" />"));
        assert!(!app.contains("cdn.example"));
    }

    #[test]
    fn config_versions_pin_known_packages() {
        let config = SandboxConfig {
            template: Some("parcel".to_string()),
            versions: [
                ("@douyinfe/semi-ui".to_string(), "^2.50.0".to_string()),
                ("lodash".to_string(), "^4.0.0".to_string()),
            ]
            .into_iter()
            .collect(),
            ..SandboxConfig::default()
        };
        let params = SandboxBuilder::from_config(TransformMode::JsxScss, &config)
            .unwrap()
            .build(&module(), &imports(), &tree())
            .unwrap();
        assert_eq!(params.template, Some(SandboxTemplate::Parcel));
        let manifest: serde_json::Value =
            serde_json::from_str(&params.files["package.json"].content).unwrap();
        assert_eq!(manifest["dependencies"]["@douyinfe/semi-ui"], "^2.50.0");
        assert!(manifest["dependencies"].get("lodash").is_none());
    }

    #[test]
    fn unknown_template_in_config_fails() {
        let config = SandboxConfig {
            template: Some("nextjs".to_string()),
            ..SandboxConfig::default()
        };
        assert!(matches!(
            SandboxBuilder::from_config(TransformMode::JsxScss, &config),
            Err(D2cError::SandboxExport(_))
        ));
    }

    #[test]
    fn validate_rejects_escaping_paths_and_unflagged_binaries() {
        let mut params = SandboxParams::default();
        params
            .files
            .insert("../evil.js".to_string(), SandboxFile::text("x"));
        assert!(params.validate().is_err());

        let mut params = SandboxParams::default();
        params
            .files
            .insert("public/logo.png".to_string(), SandboxFile::text("not binary"));
        assert!(params.validate().is_err());

        let mut params = SandboxParams::default();
        params
            .files
            .insert("public/logo.png".to_string(), SandboxFile::binary("not a url"));
        assert!(matches!(params.validate(), Err(D2cError::InvalidUrl(_))));
    }

    #[test]
    fn params_serialize_with_wire_names() {
        let mut params = SandboxParams {
            template: Some(SandboxTemplate::DojoCliCreateApp),
            ..SandboxParams::default()
        };
        params
            .files
            .insert("index.js".to_string(), SandboxFile::text("console.log(1)"));
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["template"], "@dojo/cli-create-app");
        assert_eq!(value["files"]["index.js"]["isBinary"], false);
        assert!(value.get("title").is_none());
    }

    #[tokio::test]
    async fn write_json_and_materialize() {
        let dir = tempfile::tempdir().unwrap();
        let params = SandboxBuilder::new(TransformMode::JsxScss)
            .build(&module(), &imports(), &tree())
            .unwrap();

        let json_path = dir.path().join("out").join("sandbox.json");
        params.write_json(&json_path).await.unwrap();
        let back: SandboxParams =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back, params);

        let project = dir.path().join("project");
        let written = params.materialize(&project).await.unwrap();
        assert_eq!(written.len(), 4);
        assert!(project.join("src/App.jsx").is_file());
        assert!(!project.join("public/assets/1-1.jpg").exists());
    }
}
