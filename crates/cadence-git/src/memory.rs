//! In-memory commit graph
//!
//! Implements [`CommitSource`] without touching disk, for tests and for
//! embedding the engine where history comes from somewhere other than git.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;

use chrono::{DateTime, Utc};

use cadence_core::error::GitError;

use crate::history::CommitSource;
use crate::repository::Result;
use crate::types::{CommitInfo, RevisionRange, TagInfo};

#[derive(Debug, Clone)]
struct MemoryCommit {
    info: CommitInfo,
    paths: Vec<PathBuf>,
    broken: bool,
}

/// A commit graph held in memory
///
/// Commits are listed newest first, where newer means added later.
#[derive(Debug, Default, Clone)]
pub struct MemoryHistory {
    commits: Vec<MemoryCommit>,
    index: HashMap<String, usize>,
    refs: HashMap<String, String>,
    tags: Vec<TagInfo>,
}

impl MemoryHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given subject line and parents
    pub fn add(&mut self, hash: &str, message: &str, parents: &[&str]) -> &mut Self {
        let info = self.stamp(hash, message).with_parents(parents.iter().copied());
        self.insert(info, Vec::new(), false)
    }

    /// Add a commit that touches the given paths
    pub fn add_touching(
        &mut self,
        hash: &str,
        message: &str,
        parents: &[&str],
        paths: &[&str],
    ) -> &mut Self {
        let info = self.stamp(hash, message).with_parents(parents.iter().copied());
        let paths = paths.iter().map(PathBuf::from).collect();
        self.insert(info, paths, false)
    }

    /// Add a commit that is walkable but whose lookup fails
    pub fn add_broken(&mut self, hash: &str, parents: &[&str]) -> &mut Self {
        let info = self.stamp(hash, "").with_parents(parents.iter().copied());
        self.insert(info, Vec::new(), true)
    }

    /// Point a ref (branch name or `HEAD`) at a commit
    pub fn set_ref(&mut self, name: &str, hash: &str) -> &mut Self {
        self.refs.insert(name.to_string(), hash.to_string());
        self
    }

    /// Tag a commit
    pub fn tag(&mut self, name: &str, hash: &str) -> &mut Self {
        self.tags.push(TagInfo::new(name, hash));
        self
    }

    /// Number of commits held
    pub fn len(&self) -> usize {
        self.commits.len()
    }

    /// Whether the history holds no commits
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    fn stamp(&self, hash: &str, message: &str) -> CommitInfo {
        let seconds = 1_700_000_000 + 60 * self.commits.len() as i64;
        let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0).unwrap_or_default();
        let (subject, body) = match message.split_once('\n') {
            Some((subject, body)) => (subject, body.trim_start_matches('\n')),
            None => (message, ""),
        };
        CommitInfo::new(hash, subject, "Dev", "dev@example.com", timestamp).with_body(body)
    }

    fn insert(&mut self, info: CommitInfo, paths: Vec<PathBuf>, broken: bool) -> &mut Self {
        self.index.insert(info.hash.clone(), self.commits.len());
        self.commits.push(MemoryCommit {
            info,
            paths,
            broken,
        });
        self
    }

    fn resolve(&self, revision: &str) -> Result<usize> {
        let target = self
            .refs
            .get(revision)
            .map(String::as_str)
            .or_else(|| {
                self.tags
                    .iter()
                    .find(|t| t.name == revision)
                    .map(|t| t.commit_hash.as_str())
            })
            .unwrap_or(revision);

        if revision == "HEAD" && !self.refs.contains_key("HEAD") {
            return self
                .commits
                .len()
                .checked_sub(1)
                .ok_or_else(|| GitError::InvalidRevision(revision.to_string()));
        }

        self.index
            .get(target)
            .copied()
            .ok_or_else(|| GitError::InvalidRevision(revision.to_string()))
    }

    /// Indices of every commit reachable from `start`
    fn ancestors(&self, start: usize) -> Result<HashSet<usize>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start]);
        while let Some(idx) = queue.pop_front() {
            if !seen.insert(idx) {
                continue;
            }
            for parent in &self.commits[idx].info.parents {
                let parent_idx = self
                    .index
                    .get(parent)
                    .copied()
                    .ok_or_else(|| GitError::CommitNotFound(parent.clone()))?;
                queue.push_back(parent_idx);
            }
        }
        Ok(seen)
    }
}

impl CommitSource for MemoryHistory {
    fn commits_in_range(&self, range: &RevisionRange) -> Result<Vec<String>> {
        let mut reachable = self.ancestors(self.resolve(&range.to)?)?;
        if let Some(from) = &range.from {
            let hidden = self.ancestors(self.resolve(from)?)?;
            reachable.retain(|idx| !hidden.contains(idx));
        }

        let mut ordered: Vec<usize> = reachable.into_iter().collect();
        ordered.sort_unstable_by(|a, b| b.cmp(a));

        Ok(ordered
            .into_iter()
            .map(|idx| &self.commits[idx])
            .filter(|c| match &range.path {
                Some(path) => c.paths.iter().any(|p| p.starts_with(path)),
                None => true,
            })
            .map(|c| c.info.hash.clone())
            .collect())
    }

    fn commit(&self, hash: &str) -> Result<CommitInfo> {
        match self.index.get(hash).map(|idx| &self.commits[*idx]) {
            Some(c) if !c.broken => Ok(c.info.clone()),
            _ => Err(GitError::CommitNotFound(hash.to_string())),
        }
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        Ok(self.tags.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn merged_history() -> MemoryHistory {
        let mut history = MemoryHistory::new();
        history
            .add("c0", "chore: initial", &[])
            .add("f1", "feat: add search", &["c0"])
            .add("f2", "fix: search paging", &["f1"])
            .add("c1", "docs: readme", &["c0"])
            .add("m1", "Merge pull request #7 from acme/search", &["c1", "f2"]);
        history
    }

    #[test]
    fn test_head_walk_is_newest_first() {
        let history = merged_history();
        let hashes = history.commits_in_range(&RevisionRange::head()).unwrap();
        assert_eq!(hashes, vec!["m1", "c1", "f2", "f1", "c0"]);
    }

    #[test]
    fn test_range_excludes_base_ancestry() {
        let history = merged_history();
        let hashes = history
            .commits_in_range(&RevisionRange::between("c1", "f2"))
            .unwrap();
        assert_eq!(hashes, vec!["f2", "f1"]);
    }

    #[test]
    fn test_tags_and_refs_resolve() {
        let mut history = merged_history();
        history.tag("v1.0.0", "c0").set_ref("main", "c1");

        let hashes = history
            .commits_in_range(&RevisionRange::between("v1.0.0", "main"))
            .unwrap();
        assert_eq!(hashes, vec!["c1"]);
        assert!(history.find_tag("v1.0.0").unwrap().is_some());
    }

    #[test]
    fn test_path_filter() {
        let mut history = MemoryHistory::new();
        history
            .add_touching("a", "feat(ui): x", &[], &["packages/ui/x.ts"])
            .add_touching("b", "fix(api): y", &["a"], &["packages/api/y.ts"]);

        let range = RevisionRange::head().with_path(Some(Path::new("packages/ui")));
        assert_eq!(history.commits_in_range(&range).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_failures() {
        let mut history = MemoryHistory::new();
        history.add("a", "feat: x", &[]).add_broken("b", &["a"]);

        assert!(matches!(
            history.commit("b"),
            Err(GitError::CommitNotFound(_))
        ));
        assert_eq!(
            history.commits_in_range(&RevisionRange::head()).unwrap(),
            vec!["b", "a"]
        );
        assert!(matches!(
            history.commits_in_range(&RevisionRange::between("a", "nope")),
            Err(GitError::InvalidRevision(_))
        ));

        history.add("c", "fix: y", &["missing"]);
        assert!(matches!(
            history.commits_in_range(&RevisionRange::head()),
            Err(GitError::CommitNotFound(_))
        ));
    }

    #[test]
    fn test_message_body_split() {
        let mut history = MemoryHistory::new();
        history.add("a", "feat!: drop v1 api\n\nBREAKING CHANGE: removed", &[]);
        let commit = history.commit("a").unwrap();
        assert_eq!(commit.message, "feat!: drop v1 api");
        assert_eq!(commit.body.as_deref(), Some("BREAKING CHANGE: removed"));
    }

    #[test]
    fn test_empty_history_head() {
        let history = MemoryHistory::new();
        assert!(history.is_empty());
        assert!(history.commits_in_range(&RevisionRange::head()).is_err());
    }
}
