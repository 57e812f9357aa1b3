//! Session snapshots

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use cadence_strategies::VersionDecision;

/// What one package session saw, decided and wrote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Package name
    pub package: String,

    /// Revision range walked, e.g. `v1.2.3..HEAD -- packages/ui`
    pub range: String,

    /// Commits in the range
    pub commit_count: usize,

    /// Commits per changelog bucket
    pub buckets: BTreeMap<String, usize>,

    /// Version decision
    pub decision: VersionDecision,

    /// Header of the rendered release block, if one was rendered
    pub release: Option<String>,

    /// Rendered release fragment
    pub fragment: Option<String>,

    /// Full merged changelog; kept for dry runs
    pub merged: Option<String>,

    /// Changelog file for the package
    pub changelog_path: PathBuf,

    /// Whether the changelog file was written
    pub written: bool,

    /// Whether the manifest version was updated
    pub manifest_updated: bool,

    /// Tag created for the release
    pub tag: Option<String>,
}

impl SessionSnapshot {
    /// Whether the session changed anything on disk
    pub fn changed(&self) -> bool {
        self.written || self.manifest_updated || self.tag.is_some()
    }
}
