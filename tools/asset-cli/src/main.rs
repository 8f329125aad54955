//! Asset CLI - Inspect asset manifests and render resource tags.
//!
//! Commands:
//! - `turbo-assets links` - Print `<link>` tags for static stylesheets
//! - `turbo-assets scripts` - Print `<script>` tags for static scripts
//! - `turbo-assets render` - Print both, links first
//! - `turbo-assets namespaces` - List registered package namespaces
//! - `turbo-assets paths` - List package paths of one namespace

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ManifestArgs, PathsArgs};

/// Asset CLI - Render the HTML tags an application's asset manifest produces
#[derive(Parser)]
#[command(name = "turbo-assets")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Serve config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stylesheet link tags
    Links(ManifestArgs),

    /// Print script tags
    Scripts(ManifestArgs),

    /// Print link tags followed by script tags
    Render(ManifestArgs),

    /// List package namespaces
    Namespaces(ManifestArgs),

    /// List package paths registered under a namespace
    Paths(PathsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Links(args) => commands::render::links(args, &ctx),
        Commands::Scripts(args) => commands::render::scripts(args, &ctx),
        Commands::Render(args) => commands::render::all(args, &ctx),
        Commands::Namespaces(args) => commands::inspect::namespaces(args, &ctx),
        Commands::Paths(args) => commands::inspect::paths(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
