//! Commit history access shared by the changelog engine
//!
//! [`CommitSource`] is the seam between the engine and git. The engine fans
//! commit lookups out over a worker pool, so sources must be `Send + Sync`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use semver::Version;
use tracing::debug;

use cadence_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, RevisionRange, TagInfo};

/// Read access to a commit history
pub trait CommitSource: Send + Sync {
    /// Commit hashes in a range, newest first
    fn commits_in_range(&self, range: &RevisionRange) -> Result<Vec<String>>;

    /// Look up a single commit
    fn commit(&self, hash: &str) -> Result<CommitInfo>;

    /// All tags in the history
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Find a tag by exact name
    fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        Ok(self.tags()?.into_iter().find(|t| t.name == name))
    }

    /// Highest-versioned tag accepted by `accept`
    fn latest_version_tag(&self, accept: &dyn Fn(&TagInfo) -> bool) -> Result<Option<TagInfo>> {
        let latest = self
            .tags()?
            .into_iter()
            .filter(|t| accept(t))
            .filter_map(|t| {
                let version = t.version.as_deref().and_then(|v| Version::parse(v).ok())?;
                Some((version, t))
            })
            .max_by(|a, b| a.0.cmp(&b.0))
            .map(|(_, t)| t);
        debug!(latest = ?latest.as_ref().map(|t| &t.name), "latest version tag");
        Ok(latest)
    }
}

/// A git2 repository usable from several worker threads
///
/// `git2::Repository` is not `Sync`, so every lookup takes the lock.
pub struct SharedRepo {
    inner: Mutex<GitRepo>,
}

impl SharedRepo {
    /// Wrap an opened repository
    pub fn new(repo: GitRepo) -> Self {
        Self {
            inner: Mutex::new(repo),
        }
    }

    /// Discover the repository containing `path`
    pub fn discover(path: &Path) -> Result<Self> {
        GitRepo::discover(path).map(Self::new)
    }

    fn lock(&self) -> Result<MutexGuard<'_, GitRepo>> {
        self.inner.lock().map_err(|_| GitError::LockPoisoned)
    }

    /// Repository root
    pub fn root(&self) -> Result<std::path::PathBuf> {
        Ok(self.lock()?.path().to_path_buf())
    }

    /// URL of a named remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        self.lock()?.remote_url(name)
    }

    /// Tag HEAD
    pub fn create_tag(&self, name: &str, message: Option<&str>) -> Result<TagInfo> {
        self.lock()?.create_tag(name, message)
    }
}

impl CommitSource for SharedRepo {
    fn commits_in_range(&self, range: &RevisionRange) -> Result<Vec<String>> {
        self.lock()?.commits_in_range(range)
    }

    fn commit(&self, hash: &str) -> Result<CommitInfo> {
        self.lock()?.get_commit(hash)
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        self.lock()?.tags()
    }

    fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        self.lock()?.find_tag(name)
    }
}
