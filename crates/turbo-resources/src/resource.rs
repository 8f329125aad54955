//! Resource records.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ResourceError;

/// Extra HTML attributes, kept in insertion order.
pub type Attributes = IndexMap<String, String>;

/// The two kinds of asset the registry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// JavaScript, rendered as `<script>`.
    #[serde(rename = "js", alias = "script")]
    Script,
    /// CSS, rendered as `<link rel="stylesheet">`.
    #[serde(rename = "css", alias = "stylesheet")]
    Stylesheet,
}

impl ResourceKind {
    /// Short name used in manifests and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Script => "js",
            Self::Stylesheet => "css",
        }
    }

    /// Attribute that carries the URL for a literal resource of this kind.
    pub fn url_attribute(&self) -> &'static str {
        match self {
            Self::Script => "src",
            Self::Stylesheet => "href",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "script" => Ok(Self::Script),
            "css" | "stylesheet" => Ok(Self::Stylesheet),
            _ => Err(ResourceError::InvalidResourceKind(s.to_string())),
        }
    }
}

/// A single registered script or stylesheet.
///
/// Fields are read-only once built; the `with_*` methods consume the value
/// and are only meant for construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    kind: ResourceKind,
    external_url: Option<String>,
    relative_package_path: Option<String>,
    dev_package_path: Option<String>,
    namespace: Option<String>,
    attributes: Attributes,
    dynamic: bool,
}

impl Resource {
    /// Create an empty resource of the given kind.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            external_url: None,
            relative_package_path: None,
            dev_package_path: None,
            namespace: None,
            attributes: Attributes::new(),
            dynamic: false,
        }
    }

    /// Resource for a bare URL: `src`/`href` attribute plus external URL.
    pub fn from_url(kind: ResourceKind, url: impl Into<String>) -> Self {
        let url = url.into();
        let mut attributes = Attributes::new();
        attributes.insert(kind.url_attribute().to_string(), url.clone());
        Self::new(kind)
            .with_external_url(url)
            .with_attributes(attributes)
    }

    /// Resource for a prebuilt attribute map, copied verbatim.
    pub fn from_attributes(kind: ResourceKind, attributes: Attributes) -> Self {
        Self::new(kind).with_attributes(attributes)
    }

    /// Set the external (CDN) URL.
    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_url = Some(url.into());
        self
    }

    /// Set the path relative to the owning package.
    pub fn with_relative_package_path(mut self, path: impl Into<String>) -> Self {
        self.relative_package_path = Some(path.into());
        self
    }

    /// Set the development bundle path.
    pub fn with_dev_package_path(mut self, path: impl Into<String>) -> Self {
        self.dev_package_path = Some(path.into());
        self
    }

    /// Set the owning package namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Replace the raw attribute map.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Mark as dynamic (never rendered statically).
    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Get the resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Get the external (CDN) URL.
    pub fn external_url(&self) -> Option<&str> {
        self.external_url.as_deref()
    }

    /// Get the path relative to the owning package.
    pub fn relative_package_path(&self) -> Option<&str> {
        self.relative_package_path.as_deref()
    }

    /// Get the development bundle path.
    pub fn dev_package_path(&self) -> Option<&str> {
        self.dev_package_path.as_deref()
    }

    /// Get the owning package namespace.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get the raw attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Check if the resource is excluded from static rendering.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Package path to serve, preferring the dev bundle when asked to.
    ///
    /// `None` unless a relative package path is set; a dev path alone
    /// never makes a resource locally servable.
    pub fn package_path(&self, dev_bundles: bool) -> Option<&str> {
        let path = self.relative_package_path()?;
        if dev_bundles {
            return Some(self.dev_package_path().unwrap_or(path));
        }
        Some(path)
    }
}
