//! Release version decisions
//!
//! The determiner reconciles three inputs that can disagree: the version in
//! the package manifest, the versions already written to the changelog, and
//! the commits in the release range. Every changelog lookup goes through
//! [`ChangelogDocument`], so the guards and the merger agree on what a
//! version header is.

use cadence_changelog::{ChangelogDocument, CommitType, SemanticCommit, VersionLabel};
use cadence_core::error::Result;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::semver::SemVerStrategy;
use crate::traits::VersionStrategy;
use crate::types::BumpType;

/// Outcome of a version determination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDecision {
    /// Version read from the manifest, normalized
    pub current_version: String,
    /// Version to release; equals `current_version` when nothing is bumped
    pub target_version: String,
    pub bump_type: BumpType,
    pub should_bump: bool,
    /// Human readable explanation
    pub reason: String,
}

impl VersionDecision {
    fn skip(current: &Version, reason: impl Into<String>) -> Self {
        Self {
            current_version: current.to_string(),
            target_version: current.to_string(),
            bump_type: BumpType::None,
            should_bump: false,
            reason: reason.into(),
        }
    }

    /// Keep the current version, recording why the bump was held back
    pub fn withheld(self, reason: impl Into<String>) -> Self {
        Self {
            target_version: self.current_version.clone(),
            current_version: self.current_version,
            bump_type: BumpType::None,
            should_bump: false,
            reason: reason.into(),
        }
    }

    fn release(current: &Version, target: &Version, bump_type: BumpType, reason: String) -> Self {
        Self {
            current_version: current.to_string(),
            target_version: target.to_string(),
            bump_type,
            should_bump: true,
            reason,
        }
    }
}

/// Decides the next version for a package
pub struct VersionDeterminer {
    strategy: Box<dyn VersionStrategy>,
}

impl VersionDeterminer {
    /// Create a determiner using the given strategy
    pub fn new(strategy: Box<dyn VersionStrategy>) -> Self {
        Self { strategy }
    }

    /// Decide whether and how to bump `current`
    ///
    /// `commits` is the release range as returned by the resolver. An
    /// unparseable `current` is the only error.
    #[instrument(skip(self, commits, changelog), fields(strategy = self.strategy.name(), commits = commits.len(), documented = changelog.len()))]
    pub fn determine(
        &self,
        current: &str,
        commits: &[SemanticCommit],
        changelog: &ChangelogDocument,
    ) -> Result<VersionDecision> {
        let current_raw = current.trim();
        if commits.is_empty() {
            let current_version = self
                .strategy
                .parse(current_raw)
                .map(|v| v.to_string())
                .unwrap_or_else(|_| current_raw.to_string());
            return Ok(VersionDecision {
                target_version: current_version.clone(),
                current_version,
                bump_type: BumpType::None,
                should_bump: false,
                reason: "no commits in range".to_string(),
            });
        }

        let current = self.strategy.parse(current_raw)?;

        if already_released(&current, commits, changelog) {
            debug!(version = %current, "range already documented under current version");
            return Ok(VersionDecision::skip(
                &current,
                format!("version {} already exists in changelog", current),
            ));
        }

        let is_breaking = commits.iter().any(|c| c.is_breaking);
        let is_feature = commits.iter().any(|c| c.commit_type == CommitType::Feat);
        let bump_type = self.strategy.determine_bump_type(is_breaking, is_feature);
        let next = self.strategy.bump(&current, bump_type)?;
        debug!(%bump_type, next = %next, is_breaking, is_feature, "candidate bump");

        if changelog.contains(&next) {
            return Ok(VersionDecision::skip(
                &current,
                format!("version {} already exists in changelog", next),
            ));
        }

        if current == next {
            return Ok(VersionDecision::skip(
                &current,
                format!("version {} already applied", next),
            ));
        }

        if let Some(latest) = changelog.latest_version().filter(|latest| **latest > next) {
            info!(from = %current, to = %latest, "syncing to changelog version");
            return Ok(VersionDecision::release(
                &current,
                latest,
                BumpType::Sync,
                format!(
                    "changelog already documents {}; syncing from {}",
                    latest, current
                ),
            ));
        }

        info!(from = %current, to = %next, %bump_type, "version bump decided");
        Ok(VersionDecision::release(
            &current,
            &next,
            bump_type,
            format!(
                "{} bump from {} commit(s): {} breaking, {} feature",
                bump_type,
                commits.len(),
                commits.iter().filter(|c| c.is_breaking).count(),
                commits
                    .iter()
                    .filter(|c| c.commit_type == CommitType::Feat)
                    .count()
            ),
        ))
    }
}

impl Default for VersionDeterminer {
    fn default() -> Self {
        Self::new(Box::new(SemVerStrategy::new()))
    }
}

/// Whether the block for `current` already references every commit in range
fn already_released(
    current: &Version,
    commits: &[SemanticCommit],
    changelog: &ChangelogDocument,
) -> bool {
    if !changelog.contains(current) {
        return false;
    }
    let label = VersionLabel::Version(current.clone());
    commits
        .iter()
        .all(|c| changelog.block_mentions(&label, &c.short_hash))
}
