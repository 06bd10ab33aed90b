use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sculpt_core::{ImportConfig, Importer};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "sculpt", about = "Rebuild page-builder layouts from HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// The HTML file to import (use - for stdin)
    file: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for deterministic node ids
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON on one line
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the full section/row/column document
    Document {
        #[command(flatten)]
        input: InputArgs,

        /// Image URL placed before the imported content
        #[arg(long)]
        featured_image: Option<String>,
    },
    /// Classify into a flat module list
    Modules {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Wrap the sanitized markup in a single code module
    Code {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Import a whole page with header, footer and theme
    Page {
        #[command(flatten)]
        input: InputArgs,
    },
    /// List what an import dropped or demoted
    Diagnose {
        #[command(flatten)]
        input: InputArgs,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Document {
            input,
            featured_image,
        } => {
            let (importer, html) = prepare(&input)?;
            let document = importer.parse_to_document(&html, featured_image.as_deref());
            print_json(&document, input.compact)
        }
        Commands::Modules { input } => {
            let (importer, html) = prepare(&input)?;
            print_json(&importer.parse_to_module_list(&html), input.compact)
        }
        Commands::Code { input } => {
            let (importer, html) = prepare(&input)?;
            print_json(&importer.parse_as_opaque_code(&html), input.compact)
        }
        Commands::Page { input } => {
            let (importer, html) = prepare(&input)?;
            print_json(&importer.parse_full_page(&html), input.compact)
        }
        Commands::Diagnose { input } => {
            let (importer, html) = prepare(&input)?;
            let notes: Vec<String> = importer
                .diagnose(&html)
                .iter()
                .map(ToString::to_string)
                .collect();
            print_json(&notes, input.compact)
        }
    }
}

fn prepare(input: &InputArgs) -> Result<(Importer, String)> {
    let mut config = match &input.config {
        Some(path) => ImportConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ImportConfig::default(),
    };
    if let Some(seed) = input.seed {
        config = config.with_seed(seed);
    }
    let html = read_input(&input.file)?;
    tracing::debug!(bytes = html.len(), file = %input.file, "read input");
    Ok((Importer::new(config), html))
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("reading {file}"))
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}
