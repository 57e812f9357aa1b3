//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use tracing::debug;

use cadence_core::config::load_config_or_default;
use cadence_release::{PackageOutcome, RunContext};

use crate::exit_codes;
use commands::{ChangelogCommand, InitCommand, VersionCommand};

/// Cadence - Commit-driven versioning and changelog generation
#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default configuration file
    Init(InitCommand),

    /// Decide the next version for each package
    Version(VersionCommand),

    /// Generate changelogs and bump versions
    Changelog(ChangelogCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> anyhow::Result<i32> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Version(ref cmd) => cmd.execute(&self),
            Commands::Changelog(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load configuration and open the repository around the working directory
    pub fn run_context(&self) -> anyhow::Result<RunContext> {
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd);
        debug!(config = ?config_path, "configuration resolved");
        Ok(RunContext::discover(&cwd, config)?)
    }
}

/// Exit code for a batch of package outcomes: the first failure wins
pub fn exit_code(outcomes: &[PackageOutcome]) -> i32 {
    outcomes
        .iter()
        .find_map(|outcome| match outcome {
            PackageOutcome::Failed(err) => Some(exit_codes::for_session(err)),
            PackageOutcome::Completed(_) => None,
        })
        .unwrap_or(exit_codes::SUCCESS)
}
