//! CLI command implementations.

pub mod inspect;
pub mod render;

use anyhow::Result;
use clap::Args;
use turbo_resources::ResourceRegistry;

use crate::context::Context;

/// Arguments shared by every command that reads a manifest.
#[derive(Args)]
pub struct ManifestArgs {
    /// Asset manifest (TOML or JSON).
    pub manifest: String,

    /// Serve scripts and stylesheets locally, overriding the config.
    #[arg(short, long)]
    pub local: bool,

    /// Prefer development bundles, overriding the config.
    #[arg(long)]
    pub dev: bool,
}

impl ManifestArgs {
    /// Load the manifest into a registry with command-line overrides applied.
    pub fn registry(&self, ctx: &Context) -> Result<ResourceRegistry> {
        let mut registry = ctx.registry(&self.manifest)?;
        if self.local {
            registry.set_serve_scripts_locally(true);
            registry.set_serve_css_locally(true);
        }
        if self.dev {
            registry.set_serve_dev_bundles(true);
        }
        Ok(registry)
    }
}

/// Arguments for the paths command.
#[derive(Args)]
pub struct PathsArgs {
    /// Package namespace.
    pub namespace: String,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}
