//! Version command

use clap::Args;
use tracing::info;

use cadence_release::{PackageOutcome, ReleaseManager, SessionOptions};

use crate::cli::{exit_code, output, Cli, OutputFormat};

/// Decide the next version without writing anything
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Package name (for monorepos)
    #[arg(short, long)]
    pub package: Option<String>,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(package = ?self.package, "executing version command");
        let ctx = cli.run_context()?;

        let mut options = SessionOptions::dry_run();
        options.package = self.package.clone();
        let outcomes = ReleaseManager::new(&ctx, options)?.run_all();

        match cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::outcomes_json(&outcomes))?
                );
            }
            OutputFormat::Text => {
                for outcome in &outcomes {
                    match outcome {
                        PackageOutcome::Completed(snapshot) if cli.quiet => {
                            println!("{} {}", snapshot.package, snapshot.decision.target_version);
                        }
                        PackageOutcome::Completed(snapshot) => {
                            output::print_decision(snapshot);
                            println!();
                        }
                        PackageOutcome::Failed(err) => output::error(&err.to_string()),
                    }
                }
            }
        }

        Ok(exit_code(&outcomes))
    }
}
