//! Script and stylesheet registry for server-rendered pages.
//!
//! This crate provides:
//! - `Resource` / `ResourceKind` - A registered script or stylesheet
//! - `Descriptor` - Literal URLs, attribute maps and dependency descriptors
//! - `ResourceRegistry` - Append-only registry rendering `<link>`/`<script>` tags
//! - `ServeConfig` - Serve-locally flags, mount prefix and cache-bust value
//! - `PackageVersions` - Namespace to version lookup for component suites
//! - `AssetManifest` - TOML/JSON document describing assets to register
//!
//! # Example
//!
//! ```ignore
//! use turbo_resources::{DependencySpec, ResourceKind, ResourceRegistry, ServeConfig};
//!
//! let mut registry = ResourceRegistry::with_external(
//!     &["https://cdn.example.com/app.js".into()],
//!     &["https://cdn.example.com/app.css".into()],
//! )
//! .with_config(ServeConfig::local());
//!
//! registry.add_package_version("dash_core", "2.0.0");
//! registry.register(
//!     DependencySpec::new()
//!         .with_namespace("dash_core")
//!         .with_relative_package_path(vec!["core.min.js", "plotly.min.js"]),
//!     ResourceKind::Script,
//! )?;
//!
//! let head = registry.render_links();
//! let footer = registry.render_scripts()?;
//! ```

mod config;
mod descriptor;
mod error;
mod html;
mod manifest;
mod package;
mod registry;
mod resource;

pub use config::*;
pub use descriptor::*;
pub use error::ResourceError;
pub use html::*;
pub use manifest::*;
pub use package::*;
pub use registry::ResourceRegistry;
pub use resource::*;
