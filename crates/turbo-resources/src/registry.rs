//! The append-only resource registry.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use turbo_observability::StructuredLogger;

use crate::config::ServeConfig;
use crate::descriptor::{Descriptor, LiteralResource};
use crate::error::ResourceError;
use crate::html;
use crate::manifest::AssetManifest;
use crate::package::PackageVersions;
use crate::resource::{Resource, ResourceKind};

/// Ordered collection of scripts and stylesheets for a page.
///
/// Populated during startup (framework assets, component libraries, then
/// user assets) and rendered on every page. Resources are never removed.
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    config: ServeConfig,
    versions: BTreeMap<String, String>,
    lookup: Option<Box<dyn PackageVersions>>,
    logger: StructuredLogger,
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("resources", &self.resources)
            .field("config", &self.config)
            .field("versions", &self.versions)
            .field("lookup", &self.lookup.as_ref().map(|_| "<dyn PackageVersions>"))
            .finish()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    /// Create an empty registry with default serve settings.
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            config: ServeConfig::default(),
            versions: BTreeMap::new(),
            lookup: None,
            logger: StructuredLogger::new("resources"),
        }
    }

    /// Create a registry holding user-supplied scripts, then stylesheets.
    ///
    /// Attribute keys are not checked here; invalid ones are dropped when
    /// rendering.
    pub fn with_external(scripts: &[LiteralResource], stylesheets: &[LiteralResource]) -> Self {
        let mut registry = Self::new();
        registry.resources.extend(
            scripts
                .iter()
                .map(|literal| literal.to_resource(ResourceKind::Script)),
        );
        registry.resources.extend(
            stylesheets
                .iter()
                .map(|literal| literal.to_resource(ResourceKind::Stylesheet)),
        );
        registry
    }

    /// Set serve configuration.
    pub fn with_config(mut self, config: ServeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the fallback package version lookup.
    pub fn with_versions(mut self, lookup: impl PackageVersions + 'static) -> Self {
        self.lookup = Some(Box::new(lookup));
        self
    }

    /// Set the logger handle.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Serve package scripts from this application.
    pub fn set_serve_scripts_locally(&mut self, value: bool) {
        self.config.serve_scripts_locally = value;
    }

    /// Serve package stylesheets from this application.
    pub fn set_serve_css_locally(&mut self, value: bool) {
        self.config.serve_css_locally = value;
    }

    /// Prefer development bundles when serving locally.
    pub fn set_serve_dev_bundles(&mut self, value: bool) {
        self.config.serve_dev_bundles = value;
    }

    /// Replace the serve configuration.
    pub fn set_config(&mut self, config: ServeConfig) {
        self.config = config;
    }

    /// Current serve configuration.
    pub fn config(&self) -> &ServeConfig {
        &self.config
    }

    /// Pin a package version; takes precedence over the lookup.
    pub fn add_package_version(&mut self, namespace: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(namespace.into(), version.into());
    }

    /// Version for a namespace, from pinned versions then the lookup.
    pub fn package_version(&self, namespace: &str) -> Option<String> {
        self.versions
            .get(namespace)
            .cloned()
            .or_else(|| self.lookup.as_ref().and_then(|l| l.version(namespace)))
    }

    /// Register one descriptor.
    ///
    /// Column-form dependencies are expanded first; on error nothing is
    /// appended. Returns the number of resources added.
    pub fn register(
        &mut self,
        descriptor: impl Into<Descriptor>,
        kind: ResourceKind,
    ) -> Result<usize, ResourceError> {
        let staged = descriptor.into().to_resources(kind)?;
        Ok(self.append(staged))
    }

    /// Register with a kind given as a string (`"js"` / `"css"`).
    pub fn register_kind_str(
        &mut self,
        descriptor: impl Into<Descriptor>,
        kind: &str,
    ) -> Result<usize, ResourceError> {
        let kind: ResourceKind = kind.parse()?;
        self.register(descriptor, kind)
    }

    /// Register several descriptors of one kind, all or nothing.
    pub fn register_all<I, D>(&mut self, descriptors: I, kind: ResourceKind) -> Result<usize, ResourceError>
    where
        I: IntoIterator<Item = D>,
        D: Into<Descriptor>,
    {
        let mut staged = Vec::new();
        for descriptor in descriptors {
            staged.extend(descriptor.into().to_resources(kind)?);
        }
        Ok(self.append(staged))
    }

    /// Register everything a manifest lists, all or nothing.
    pub fn load_manifest(&mut self, manifest: &AssetManifest) -> Result<usize, ResourceError> {
        let staged = manifest.to_resources()?;
        for (namespace, version) in &manifest.packages {
            self.versions.insert(namespace.clone(), version.clone());
        }
        Ok(self.append(staged))
    }

    fn append(&mut self, staged: Vec<Resource>) -> usize {
        let count = staged.len();
        for resource in staged {
            self.logger
                .debug_builder("registered resource")
                .field("kind", resource.kind().name())
                .field("namespace", resource.namespace().unwrap_or("-"))
                .field_bool("dynamic", resource.is_dynamic())
                .emit();
            self.resources.push(resource);
        }
        count
    }

    /// All resources in registration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> + '_ {
        self.resources.iter().filter(move |r| r.kind() == kind)
    }

    /// Distinct namespaces among registered scripts.
    pub fn namespaces(&self) -> BTreeSet<String> {
        self.of_kind(ResourceKind::Script)
            .filter_map(|r| r.namespace().map(str::to_string))
            .collect()
    }

    /// Package paths of the scripts in `namespace`, in registration order.
    pub fn paths(&self, namespace: &str) -> Vec<Option<String>> {
        self.of_kind(ResourceKind::Script)
            .filter(|r| r.namespace() == Some(namespace))
            .map(|r| r.relative_package_path().map(str::to_string))
            .collect()
    }

    /// `<link>` tags for every static stylesheet, newline separated.
    pub fn render_links(&self) -> String {
        let local = self.config.serve_css_locally;
        let dev = self.config.serve_dev_bundles;

        self.of_kind(ResourceKind::Stylesheet)
            .filter(|r| !r.is_dynamic())
            .map(|r| match (local.then(|| r.package_path(dev)).flatten(), r.external_url()) {
                (Some(path), _) => html::stylesheet_href(path),
                (None, Some(url)) => html::stylesheet_href(url),
                (None, None) => html::link_tag(r.attributes()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `<script>` tags for every static script, newline separated.
    ///
    /// Nothing is emitted unless scripts are served locally.
    pub fn render_scripts(&self) -> Result<String, ResourceError> {
        if !self.config.serve_scripts_locally {
            return Ok(String::new());
        }

        let prefix = self.config.suites_prefix();
        let mut tags = Vec::new();

        for resource in self.of_kind(ResourceKind::Script).filter(|r| !r.is_dynamic()) {
            if let Some(path) = resource.package_path(self.config.serve_dev_bundles) {
                let namespace = resource
                    .namespace()
                    .ok_or_else(|| ResourceError::MissingNamespace {
                        path: path.to_string(),
                    })?;
                let version = self
                    .package_version(namespace)
                    .ok_or_else(|| ResourceError::UnknownPackage(namespace.to_string()))?;
                let src = html::component_suite_url(
                    &prefix,
                    namespace,
                    path,
                    &version,
                    &self.config.cache_bust,
                );
                tags.push(html::script_src(&src));
            } else if resource.attributes().contains_key("src") {
                tags.push(html::script_tag(resource.attributes()));
            }
        }

        Ok(tags.join("\n"))
    }
}
