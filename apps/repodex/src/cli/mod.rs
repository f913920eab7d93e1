//! # repodex CLI Module
//!
//! This module implements the CLI interface for repodex.
//!
//! ## Available Commands
//!
//! - `collect` - Fetch metadata and write the bucket documents
//! - `render` - Render the bucket documents as Markdown tables
//! - `run` - `collect` with defaults, then `render` (default command)
//! - `inspect` - Print the raw GitHub payload of a repository by numeric ID

mod commands;

use crate::config::{Credential, Settings};
use clap::{Args, Parser, Subcommand};
use repodex_core::{Columns, RepodexError};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// repodex - curated repository list generator
///
/// Collects GitHub repositories from a list of URLs, classifies them and
/// renders grouped Markdown tables.
#[derive(Parser, Debug)]
#[command(name = "repodex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (per-repository progress and skips)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress summary output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the config file (default: ./repodex.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the bucket documents
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for the rendered tables
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Output summaries in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and split into valid.yml / inactive.yml / archived.yml
    Collect(CollectArgs),

    /// Render VALID.md, INACTIVE.md and ARCHIVED.md from the bucket documents
    Render(RenderArgs),

    /// Collect from repos.txt, then render
    Run(CollectArgs),

    /// Print the full GitHub metadata of a repository, looked up by ID
    Inspect(InspectArgs),
}

/// Arguments of the `collect` command.
#[derive(Args, Debug, Clone)]
pub struct CollectArgs {
    /// Input list: one repository URL per line
    #[arg(short, long, default_value = "repos.txt")]
    pub txt: PathBuf,

    /// Skip the GitHub API and build records from the URLs alone
    #[arg(long)]
    pub no_api: bool,

    /// Disable keyword classification
    #[arg(long)]
    pub no_classify: bool,
}

impl Default for CollectArgs {
    fn default() -> Self {
        Self {
            txt: PathBuf::from("repos.txt"),
            no_api: false,
            no_classify: false,
        }
    }
}

/// Arguments of the `inspect` command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct InspectArgs {
    /// Numeric repository ID (prompted for when omitted)
    #[arg(short, long)]
    pub id: Option<u64>,
}

/// Arguments of the `render` command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RenderArgs {
    /// Render everything into a single README.md
    #[arg(long)]
    pub combined: bool,

    /// Add the author column
    #[arg(long)]
    pub author: bool,

    /// Omit the star column
    #[arg(long)]
    pub no_star: bool,

    /// Omit the last-commit column
    #[arg(long)]
    pub no_commit: bool,

    /// Omit the top-language column
    #[arg(long)]
    pub no_language: bool,

    /// Omit the license column
    #[arg(long)]
    pub no_license: bool,

    /// Omit the description column
    #[arg(long)]
    pub no_description: bool,

    /// Show the archived column in every document
    #[arg(long)]
    pub archived: bool,
}

impl RenderArgs {
    /// Apply the flags on top of a bucket's default columns.
    #[must_use]
    pub fn columns(&self, base: Columns) -> Columns {
        Columns {
            author: base.author || self.author,
            star: base.star && !self.no_star,
            last_commit: base.last_commit && !self.no_commit,
            language: base.language && !self.no_language,
            license: base.license && !self.no_license,
            archived: base.archived || self.archived,
            description: base.description && !self.no_description,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
///
/// The credential and settings are resolved before any command runs, so a
/// configuration error aborts the whole invocation up front.
pub async fn execute(cli: Cli) -> Result<(), RepodexError> {
    let credential = Credential::from_env()?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if let Some(dir) = cli.output_dir {
        settings.output_dir = dir;
    }

    let output = Output {
        json_mode: cli.json_mode,
        quiet: cli.quiet,
    };

    match cli.command {
        Some(Commands::Collect(args)) => {
            cmd_collect(&settings, &credential, &args, output).await?;
            Ok(())
        }
        Some(Commands::Render(args)) => cmd_render(&settings, &args, output),
        Some(Commands::Run(args)) => cmd_run(&settings, &credential, &args, output).await,
        Some(Commands::Inspect(args)) => {
            cmd_inspect(&settings, &credential, &args).await?;
            Ok(())
        }
        None => cmd_run(&settings, &credential, &CollectArgs::default(), output).await,
    }
}
