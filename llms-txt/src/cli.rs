///
/// This module implements the CLI interface for llms-txt: command parsing,
/// configuration layering and user-visible output.
///
/// All pipeline logic (metadata extraction, normalization, index rendering)
/// lives in the [`llms-txt-core`] crate. This module is strictly CLI glue.
///
/// ## Commands
/// - `generate`: write `<output>/md/**` and `<output>/llms.txt` for a content tree.
/// - `inspect`: show what the pipeline extracts from a single file, as JSON.
///
/// ## How To Use
/// - For command-line users: use the installed `llms-txt` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`llms-txt-core`]: ../../llms-txt-core/
use crate::load_config::{load_config, ConfigOverrides};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use llms_txt_core::corpus::describe_file;
use llms_txt_core::discovery::GlobDiscovery;
use llms_txt_core::generate::generate;
use llms_txt_core::store::FsStore;
use std::path::{Path, PathBuf};

/// CLI for llms-txt: turn a Markdown/MDX content tree into an llms.txt index.
#[derive(Parser)]
#[clap(
    name = "llms-txt",
    version,
    about = "Convert Markdown/MDX content into plain Markdown copies and an llms.txt index"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the Markdown copies and llms.txt
    Generate(GenerateArgs),
    /// Print the metadata, title, description and output path for one file
    Inspect {
        /// Source file to inspect
        file: PathBuf,
        /// Content root used to compute the category and output path
        #[clap(long)]
        content_dir: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Path to an optional YAML config file
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Root directory of the source documents
    #[clap(long)]
    pub content_dir: Option<PathBuf>,
    /// Directory receiving md/ and llms.txt
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
    /// Prefix prepended to every link in llms.txt
    #[clap(long)]
    pub base_url: Option<String>,
    /// Heading of llms.txt
    #[clap(long)]
    pub project_name: Option<String>,
    /// Summary line under the heading of llms.txt
    #[clap(long)]
    pub project_description: Option<String>,
}

impl GenerateArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            content_dir: self.content_dir.clone(),
            output_dir: self.output_dir.clone(),
            base_url: self.base_url.clone(),
            project_name: self.project_name.clone(),
            project_description: self.project_description.clone(),
            ..ConfigOverrides::default()
        }
    }
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Inspect { file, content_dir } => run_inspect(&file, content_dir.as_deref()),
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref(), args.overrides())?;
    tracing::info!(command = "generate", "Starting generation");

    let discovery = GlobDiscovery::new(config.include.clone(), config.ignore.clone());
    match generate(&config, &discovery, &FsStore).await {
        Ok(report) => {
            tracing::info!(command = "generate", documents = report.documents_written, "Generation complete");
            println!(
                "Wrote {} documents in {} categories; index at {}",
                report.documents_written,
                report.categories.len(),
                report.index_path.display()
            );
            for (path, sources) in &report.collisions {
                println!(
                    "Collision: {} written by {} sources (last one kept)",
                    path,
                    sources.len()
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = "generate", error = %e, "Generation failed");
            Err(anyhow::Error::new(e).context("Generation failed"))
        }
    }
}

fn run_inspect(file: &Path, content_dir: Option<&Path>) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let relative = content_dir
        .and_then(|root| file.strip_prefix(root).ok())
        .or_else(|| file.file_name().map(Path::new))
        .unwrap_or(file);

    let processed = describe_file(relative, &raw);
    let output = serde_json::json!({
        "relative_path": processed.entry.relative_path,
        "metadata": processed.content.metadata,
        "title": processed.entry.title,
        "description": processed.entry.description,
        "category": processed.entry.category,
        "url_path": processed.url_path,
        "url": processed.entry.url,
        "body_chars": processed.content.body.chars().count(),
    });
    let pretty = serde_json::to_string_pretty(&output).context("Failed to render inspection output")?;
    println!("{pretty}");
    Ok(())
}
