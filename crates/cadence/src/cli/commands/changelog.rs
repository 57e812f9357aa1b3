//! Changelog command

use clap::Args;
use tracing::info;

use cadence_release::{PackageOutcome, ReleaseManager, SessionOptions, SessionSnapshot};

use crate::cli::{exit_code, output, Cli, OutputFormat};

/// Generate changelogs and bump versions
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Compute everything and print the result without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Render the range under "Unreleased" without bumping the version
    #[arg(long, conflicts_with = "tag")]
    pub unreleased: bool,

    /// Only process this package
    #[arg(short, long)]
    pub package: Option<String>,

    /// Create the release tag when the version is bumped
    #[arg(long)]
    pub tag: bool,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(
            dry_run = self.dry_run,
            unreleased = self.unreleased,
            tag = self.tag,
            package = ?self.package,
            "executing changelog command"
        );
        let ctx = cli.run_context()?;

        let options = SessionOptions {
            dry_run: self.dry_run,
            unreleased: self.unreleased,
            tag: self.tag,
            package: self.package.clone(),
        };
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
                        PackageOutcome::Completed(snapshot) => self.report(snapshot, cli),
                        PackageOutcome::Failed(err) => output::error(&err.to_string()),
                    }
                }
            }
        }

        Ok(exit_code(&outcomes))
    }

    fn report(&self, snapshot: &SessionSnapshot, cli: &Cli) {
        if cli.quiet {
            return;
        }
        let decision = &snapshot.decision;

        if self.dry_run {
            match &snapshot.fragment {
                Some(fragment) => {
                    println!("{}", output::header(&snapshot.package));
                    println!();
                    println!("{}", fragment);
                }
                None => output::info(&format!(
                    "{}: nothing to release ({})",
                    snapshot.package, decision.reason
                )),
            }
            return;
        }

        if !snapshot.changed() {
            output::info(&format!(
                "{}: nothing to release ({})",
                snapshot.package, decision.reason
            ));
            return;
        }
        if snapshot.written {
            output::success(&format!(
                "{}: changelog written to {}",
                snapshot.package,
                output::path_style().apply_to(snapshot.changelog_path.display())
            ));
        }
        if snapshot.manifest_updated {
            output::success(&format!(
                "{}: version {} → {} ({})",
                snapshot.package,
                decision.current_version,
                output::bump_style(decision.bump_type).apply_to(&decision.target_version),
                decision.bump_type
            ));
        }
        if let Some(tag) = &snapshot.tag {
            output::success(&format!("{}: tagged {}", snapshot.package, tag));
        }
    }
}
