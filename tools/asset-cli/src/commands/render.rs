//! Tag rendering commands.

use anyhow::Result;
use serde::Serialize;

use super::ManifestArgs;
use crate::context::Context;

#[derive(Serialize)]
struct Rendered<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    links: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scripts: Option<Vec<&'a str>>,
}

/// Run the links command.
pub fn links(args: ManifestArgs, ctx: &Context) -> Result<()> {
    let registry = args.registry(ctx)?;
    let links = registry.render_links();

    if ctx.output.is_json() {
        ctx.output.json(&Rendered {
            links: Some(lines(&links)),
            scripts: None,
        });
        return Ok(());
    }

    ctx.output.raw(&links);
    Ok(())
}

/// Run the scripts command.
pub fn scripts(args: ManifestArgs, ctx: &Context) -> Result<()> {
    let registry = args.registry(ctx)?;
    if !registry.config().serve_scripts_locally {
        ctx.output
            .warn("Scripts are not served locally; no script tags are rendered (use --local)");
    }
    let scripts = registry.render_scripts()?;

    if ctx.output.is_json() {
        ctx.output.json(&Rendered {
            links: None,
            scripts: Some(lines(&scripts)),
        });
        return Ok(());
    }

    ctx.output.raw(&scripts);
    Ok(())
}

/// Run the render command.
pub fn all(args: ManifestArgs, ctx: &Context) -> Result<()> {
    let registry = args.registry(ctx)?;
    let links = registry.render_links();
    let scripts = registry.render_scripts()?;

    if ctx.output.is_json() {
        ctx.output.json(&Rendered {
            links: Some(lines(&links)),
            scripts: Some(lines(&scripts)),
        });
        return Ok(());
    }

    ctx.output.raw(&links);
    ctx.output.raw(&scripts);
    ctx.output.success(&format!(
        "Rendered {} link(s) and {} script(s)",
        lines(&links).len(),
        lines(&scripts).len()
    ));
    Ok(())
}

fn lines(rendered: &str) -> Vec<&str> {
    rendered.lines().collect()
}
