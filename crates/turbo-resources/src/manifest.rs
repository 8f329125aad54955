//! Asset manifests.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::descriptor::{DependencySpec, Descriptor, LiteralResource};
use crate::error::ResourceError;
use crate::resource::{Attributes, Resource, ResourceKind};

/// A document listing every asset an application registers at startup.
///
/// ```toml
/// external_scripts = ["https://cdn.example.com/app.js"]
/// external_stylesheets = [{ href = "https://cdn.example.com/app.css", media = "screen" }]
///
/// [[resources]]
/// kind = "js"
/// form = "dependency"
/// namespace = "dash_core"
/// relative_package_path = ["core.min.js", "plotly.min.js"]
///
/// [packages]
/// dash_core = "2.0.0"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// User-supplied scripts, registered first.
    pub external_scripts: Vec<LiteralResource>,
    /// User-supplied stylesheets, registered second.
    pub external_stylesheets: Vec<LiteralResource>,
    /// Further entries with explicit kind and form.
    pub resources: Vec<ManifestEntry>,
    /// Package versions for component-suite URLs.
    pub packages: BTreeMap<String, String>,
}

/// One `[[resources]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// `"js"` or `"css"`.
    pub kind: String,
    /// `"raw"` (or `"literal"`) or `"dependency"`.
    #[serde(default = "default_form")]
    pub form: String,
    /// Bare URL for the raw form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Attribute map for the raw form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Dependency fields.
    #[serde(flatten)]
    pub dependency: DependencySpec,
}

fn default_form() -> String {
    "dependency".to_string()
}

impl ManifestEntry {
    /// Parse the kind string.
    pub fn resource_kind(&self) -> Result<ResourceKind, ResourceError> {
        self.kind.parse()
    }

    /// Build the descriptor this entry describes.
    pub fn descriptor(&self) -> Result<Descriptor, ResourceError> {
        let has_dependency_fields = self.dependency != DependencySpec::default();
        let has_raw_fields = self.url.is_some() || self.attributes.is_some();

        match self.form.as_str() {
            "raw" | "literal" if has_dependency_fields => Err(ResourceError::Manifest(
                "raw entry sets dependency fields".to_string(),
            )),
            "raw" | "literal" => match (&self.url, &self.attributes) {
                (Some(url), None) => Ok(LiteralResource::Url(url.clone()).into()),
                (None, Some(attributes)) => Ok(LiteralResource::Attributes(attributes.clone()).into()),
                (Some(_), Some(_)) => Err(ResourceError::Manifest(
                    "raw entry sets both `url` and `attributes`".to_string(),
                )),
                (None, None) => Err(ResourceError::Manifest(
                    "raw entry needs `url` or `attributes`".to_string(),
                )),
            },
            "dependency" if has_raw_fields => Err(ResourceError::Manifest(
                "dependency entry sets `url` or `attributes` (use form = \"raw\")".to_string(),
            )),
            "dependency" if !has_dependency_fields => Err(ResourceError::Manifest(
                "dependency entry sets no dependency fields".to_string(),
            )),
            "dependency" => Ok(self.dependency.clone().into()),
            other => Err(ResourceError::InvalidForm(other.to_string())),
        }
    }
}

impl AssetManifest {
    /// Load from a TOML or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read asset manifest: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON manifest: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML manifest: {}", path.display()))
        }
    }

    /// Expand every entry into resources, in registration order.
    ///
    /// Fails on the first bad entry; nothing is registered anywhere.
    pub fn to_resources(&self) -> Result<Vec<Resource>, ResourceError> {
        let mut staged: Vec<Resource> = Vec::new();

        for literal in &self.external_scripts {
            literal.validate()?;
            staged.push(literal.to_resource(ResourceKind::Script));
        }
        for literal in &self.external_stylesheets {
            literal.validate()?;
            staged.push(literal.to_resource(ResourceKind::Stylesheet));
        }

        for (index, entry) in self.resources.iter().enumerate() {
            let kind = entry.resource_kind()?;
            let descriptor = entry.descriptor().map_err(|e| match e {
                ResourceError::Manifest(msg) => {
                    ResourceError::Manifest(format!("resources[{}]: {}", index, msg))
                }
                other => other,
            })?;
            staged.extend(descriptor.to_resources(kind)?);
        }

        Ok(staged)
    }
}
