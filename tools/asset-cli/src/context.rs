//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_observability::StructuredLogger;
use turbo_resources::{AssetManifest, ResourceRegistry, ServeConfig};

use crate::output::Output;

/// File names searched for a serve config, nearest directory first.
const CONFIG_NAMES: [&str; 3] = ["assets.toml", ".assets.toml", "assets.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Serve configuration.
    pub config: ServeConfig,
    /// Output handler.
    pub output: Output,
    /// Logger handed to library calls.
    pub logger: StructuredLogger,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            output.debug(&format!("Using serve config {}", path));
            ServeConfig::load(path)?
        } else if let Some((config, path)) = find_config(&cwd, &output) {
            output.debug(&format!("Using serve config {}", path.display()));
            config
        } else {
            output.debug("No serve config found, using defaults");
            ServeConfig::default()
        };

        let logger = output.logger("turbo-assets");
        Ok(Self {
            config,
            output,
            logger,
            cwd,
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Load a manifest and register it into a fresh registry.
    pub fn registry(&self, manifest: &str) -> Result<ResourceRegistry> {
        let path = self.resolve_path(manifest);
        let manifest = AssetManifest::load(&path)?;

        let mut registry = ResourceRegistry::new()
            .with_config(self.config.clone())
            .with_logger(self.logger.scoped("registry"));
        let count = registry
            .load_manifest(&manifest)
            .with_context(|| format!("Invalid asset manifest: {}", path.display()))?;

        self.logger
            .info_builder("loaded manifest")
            .field("path", path.display().to_string())
            .field_i64("resources", count as i64)
            .field_i64("packages", manifest.packages.len() as i64)
            .emit();
        Ok(registry)
    }
}

/// Find a serve config in the directory tree.
///
/// A file that fails to parse is reported and skipped.
fn find_config(start: &Path, output: &Output) -> Option<(ServeConfig, PathBuf)> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES.iter().find_map(|name| {
            let path = dir.join(name);
            if !path.exists() {
                return None;
            }
            match ServeConfig::load(&path) {
                Ok(config) => Some((config, path)),
                Err(e) => {
                    output.warn(&format!("Ignoring serve config: {:#}", e));
                    None
                }
            }
        })
    })
}
