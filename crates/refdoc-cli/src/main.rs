//! Refdoc CLI - Command-line interface for the refdoc reference-page generator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use refdoc_core::Renderer;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod generate;
mod loader;

use config::ProjectConfig;

#[derive(Parser)]
#[command(name = "refdoc")]
#[command(version = refdoc_core::VERSION)]
#[command(about = "Generate C API reference pages from descriptor catalogues", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the project config (defaults to ./refdoc.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page and the table of contents
    Generate {
        /// Catalogue files or directories (defaults to the configured paths)
        paths: Vec<PathBuf>,

        /// Output directory for generated pages
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the table of contents
    Toc {
        /// Catalogue files or directories (defaults to the configured paths)
        paths: Vec<PathBuf>,
    },

    /// Print a single page
    Page {
        /// Page name, e.g. "tcp_connect" or "tcp_connect_mem"
        name: String,

        /// Catalogue files or directories (defaults to the configured paths)
        paths: Vec<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose >= 2)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project = ProjectConfig::discover(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Generate {
            paths,
            output,
            dry_run,
        } => {
            let registry = loader::load_registry(&catalogue_paths(paths, &project))?;
            let renderer = Renderer::new(&registry, &project.render);
            let output_dir = output.unwrap_or_else(|| project.output.dir.clone());

            let report = generate::generate_pages(&renderer, &output_dir, dry_run)?;
            for file in &report.files {
                if dry_run {
                    println!("Would generate: {}", file.display());
                } else {
                    println!("Generated: {}", file.display());
                }
            }
        }

        Commands::Toc { paths } => {
            let registry = loader::load_registry(&catalogue_paths(paths, &project))?;
            print!("{}", Renderer::new(&registry, &project.render).toc());
        }

        Commands::Page { name, paths } => {
            let registry = loader::load_registry(&catalogue_paths(paths, &project))?;
            let page = Renderer::new(&registry, &project.render)
                .render(&name)
                .with_context(|| format!("No page named '{name}'"))?;
            print!("{page}");
        }
    }

    Ok(())
}

/// Paths given on the command line win over the configured ones
fn catalogue_paths(cli_paths: Vec<PathBuf>, project: &ProjectConfig) -> Vec<PathBuf> {
    if cli_paths.is_empty() {
        project.catalogue.paths.clone()
    } else {
        cli_paths
    }
}
