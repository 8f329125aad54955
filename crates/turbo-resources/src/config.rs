//! Serve configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default value of the `m=` cache-bust query parameter.
pub const DEFAULT_CACHE_BUST: &str = "1";

/// URL segment under which component-suite packages are served.
pub const COMPONENT_SUITES_SEGMENT: &str = "_dash-component-suites";

/// How registered resources are turned into URLs.
///
/// Fix these before the first render of a response; rendering reads them
/// without any synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Serve package scripts from this application.
    pub serve_scripts_locally: bool,
    /// Serve package stylesheets from this application.
    pub serve_css_locally: bool,
    /// Prefer development bundles when serving locally.
    pub serve_dev_bundles: bool,
    /// Mount prefix prepended to component-suite URLs.
    pub url_base_pathname: String,
    /// Value of the `m=` query parameter on component-suite URLs.
    pub cache_bust: String,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            serve_scripts_locally: false,
            serve_css_locally: false,
            serve_dev_bundles: false,
            url_base_pathname: String::new(),
            cache_bust: DEFAULT_CACHE_BUST.to_string(),
        }
    }
}

impl ServeConfig {
    /// Serve both scripts and stylesheets locally.
    pub fn local() -> Self {
        Self {
            serve_scripts_locally: true,
            serve_css_locally: true,
            ..Self::default()
        }
    }

    /// Set the mount prefix.
    pub fn with_url_base_pathname(mut self, prefix: impl Into<String>) -> Self {
        self.url_base_pathname = prefix.into();
        self
    }

    /// Set the cache-bust value.
    pub fn with_cache_bust(mut self, value: impl Into<String>) -> Self {
        self.cache_bust = value.into();
        self
    }

    /// Enable or disable development bundles.
    pub fn with_dev_bundles(mut self, enabled: bool) -> Self {
        self.serve_dev_bundles = enabled;
        self
    }

    /// Load from a TOML or JSON file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read serve config: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON serve config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML serve config: {}", path.display()))
        }
    }

    /// Prefix for component-suite URLs, e.g. `/app/_dash-component-suites/`.
    pub fn suites_prefix(&self) -> String {
        format!("{}{}/", self.url_base_pathname, COMPONENT_SUITES_SEGMENT)
    }
}
