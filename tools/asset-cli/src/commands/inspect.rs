//! Registry inspection commands.

use anyhow::Result;

use super::{ManifestArgs, PathsArgs};
use crate::context::Context;

/// Run the namespaces command.
pub fn namespaces(args: ManifestArgs, ctx: &Context) -> Result<()> {
    let registry = args.registry(ctx)?;
    let namespaces = registry.namespaces();

    if ctx.output.is_json() {
        ctx.output.json(&namespaces);
        return Ok(());
    }

    if namespaces.is_empty() {
        ctx.output.warn("No package namespaces registered");
        return Ok(());
    }

    ctx.output.header("Namespaces");
    for namespace in &namespaces {
        ctx.output.list_item(namespace);
    }
    Ok(())
}

/// Run the paths command.
pub fn paths(args: PathsArgs, ctx: &Context) -> Result<()> {
    let registry = args.manifest.registry(ctx)?;
    let paths = registry.paths(&args.namespace);

    if ctx.output.is_json() {
        ctx.output.json(&paths);
        return Ok(());
    }

    if paths.is_empty() {
        ctx.output
            .warn(&format!("No resources registered under '{}'", args.namespace));
        return Ok(());
    }

    ctx.output.header(&format!("Paths in {}", args.namespace));
    for path in &paths {
        ctx.output.list_item(path.as_deref().unwrap_or("-"));
    }
    Ok(())
}
