//! Git types

use std::path::{Path, PathBuf};

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

static TAG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:.+?[@-])?v?(?P<version>\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)$",
    )
    .expect("Invalid regex")
});

/// Information about a git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Everything after the subject line
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent hashes, first parent first
    pub parents: Vec<String>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = short_hash(&hash);

        Self {
            hash,
            short_hash,
            message: message.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
            parents: Vec::new(),
        }
    }

    /// Set the commit body; an empty body is stored as `None`
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.trim().is_empty() {
            None
        } else {
            Some(body)
        };
        self
    }

    /// Set the parent hashes
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Get the full message including body
    pub fn full_message(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.message, body),
            None => self.message.clone(),
        }
    }

    /// Whether the commit has more than one parent
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// First parent, if any
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Second parent (the merged-in branch tip), if any
    pub fn second_parent(&self) -> Option<&str> {
        self.parents.get(1).map(String::as_str)
    }
}

/// Abbreviate a hash to seven characters
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(7).collect()
}

/// A revision range query: everything reachable from `to` but not from `from`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    /// Exclusive lower bound; `None` walks the whole history
    pub from: Option<String>,
    /// Inclusive upper bound
    pub to: String,
    /// Only keep commits touching this path
    pub path: Option<PathBuf>,
}

impl RevisionRange {
    /// Everything reachable from HEAD
    pub fn head() -> Self {
        Self {
            from: None,
            to: "HEAD".to_string(),
            path: None,
        }
    }

    /// Everything reachable from HEAD but not from `from`
    pub fn since(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: "HEAD".to_string(),
            path: None,
        }
    }

    /// Everything reachable from `to` but not from `from`
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
            path: None,
        }
    }

    /// Restrict the range to commits touching a path
    pub fn with_path(mut self, path: Option<&Path>) -> Self {
        self.path = path.map(Path::to_path_buf);
        self
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.from {
            Some(from) => write!(f, "{}..{}", from, self.to)?,
            None => write!(f, "{}", self.to)?,
        }
        if let Some(path) = &self.path {
            write!(f, " -- {}", path.display())?;
        }
        Ok(())
    }
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Extracted version from tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = extract_version(&name);

        Self {
            name,
            commit_hash: commit_hash.into(),
            message: None,
            version,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Version part of a tag name: `v1.0.0`, `1.0.0`, `ui@1.0.0`, `ui-v1.0.0`
fn extract_version(tag: &str) -> Option<String> {
    TAG_VERSION_REGEX
        .captures(tag)
        .and_then(|caps| caps.name("version"))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_versions() {
        let version = |tag: &str| TagInfo::new(tag, "abc").version;
        assert_eq!(version("v1.0.0").as_deref(), Some("1.0.0"));
        assert_eq!(version("1.0.0").as_deref(), Some("1.0.0"));
        assert_eq!(version("@acme/ui@2.1.0").as_deref(), Some("2.1.0"));
        assert_eq!(version("api-v0.3.1").as_deref(), Some("0.3.1"));
        assert_eq!(version("ui@3.0.0-rc.1").as_deref(), Some("3.0.0-rc.1"));
        assert_eq!(version("v1.0.0-rc-2").as_deref(), Some("1.0.0-rc-2"));
        assert_eq!(version("v1.2"), None);
        assert_eq!(version("nightly"), None);
    }

    #[test]
    fn test_commit_parents() {
        let commit = CommitInfo::new(
            "abc1234567890",
            "Merge pull request #12 from acme/feature",
            "Author",
            "author@example.com",
            Utc::now(),
        )
        .with_parents(["p1", "p2"]);

        assert_eq!(commit.short_hash, "abc1234");
        assert!(commit.is_merge());
        assert_eq!(commit.first_parent(), Some("p1"));
        assert_eq!(commit.second_parent(), Some("p2"));
    }

    #[test]
    fn test_blank_body_is_none() {
        let commit = CommitInfo::new("a", "fix: x", "A", "a@x", Utc::now()).with_body("  \n");
        assert!(commit.body.is_none());
        assert_eq!(commit.full_message(), "fix: x");
    }

    #[test]
    fn test_range_display() {
        let range = RevisionRange::since("v1.0.0").with_path(Some(Path::new("packages/ui")));
        assert_eq!(range.to_string(), "v1.0.0..HEAD -- packages/ui");
        assert_eq!(RevisionRange::head().to_string(), "HEAD");
    }
}
