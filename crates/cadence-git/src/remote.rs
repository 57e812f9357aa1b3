//! Remote lookups

use std::sync::LazyLock;

use regex::Regex;

use cadence_core::error::GitError;

use crate::repository::{GitRepo, Result};

static SCP_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[\w.-]+@)?([\w.-]+):([\w./-]+?)(?:\.git)?/?$").expect("Invalid regex")
});

static URL_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?|ssh|git)://(?:[^@/]+@)?([\w.-]+)(?::\d+)?/([\w./-]+?)(?:\.git)?/?$")
        .expect("Invalid regex")
});

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}

/// Turn a fetch URL into the browsable `https://host/owner/repo` form
///
/// Handles `git@host:owner/repo.git`, `ssh://git@host/owner/repo.git` and
/// plain https URLs. Returns `None` for local paths and anything else.
pub fn web_url_from_remote(remote: &str) -> Option<String> {
    let remote = remote.trim();
    let caps = if remote.contains("://") {
        URL_REMOTE.captures(remote)?
    } else {
        SCP_REMOTE.captures(remote)?
    };
    Some(format!("https://{}/{}", &caps[1], &caps[2]))
}
