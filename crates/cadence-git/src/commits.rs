//! Commit history operations

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::{DiffOptions, Oid, Sort};
use tracing::{debug, instrument};

use cadence_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{CommitInfo, RevisionRange};

impl GitRepo {
    /// List commit hashes in a revision range, newest first
    #[instrument(skip(self), fields(range = %range))]
    pub fn commits_in_range(&self, range: &RevisionRange) -> Result<Vec<String>> {
        let to = self.resolve(&range.to)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(to)?;
        if let Some(from) = &range.from {
            revwalk.hide(self.resolve(from)?)?;
        }

        let mut hashes = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            if let Some(path) = &range.path {
                let commit = self.repo.find_commit(oid)?;
                if !self.touches_path(&commit, path)? {
                    continue;
                }
            }
            hashes.push(oid.to_string());
        }

        debug!(count = hashes.len(), "walked revision range");
        Ok(hashes)
    }

    /// Get a specific commit by hash
    pub fn get_commit(&self, hash: &str) -> Result<CommitInfo> {
        let oid = Oid::from_str(hash).map_err(|_| GitError::CommitNotFound(hash.to_string()))?;
        let commit = self
            .repo
            .find_commit(oid)
            .map_err(|_| GitError::CommitNotFound(hash.to_string()))?;
        Ok(commit_to_info(&commit))
    }

    /// Whether a commit changes anything under `path` relative to its first parent
    fn touches_path(&self, commit: &git2::Commit<'_>, path: &Path) -> Result<bool> {
        let tree = commit.tree()?;
        let parent_tree = match commit.parent(0) {
            Ok(parent) => Some(parent.tree()?),
            Err(_) => None,
        };

        let mut opts = DiffOptions::new();
        opts.pathspec(path);
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();
    let body = commit.body().unwrap_or_default().to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitInfo::new(
        commit.id().to_string(),
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_body(body)
    .with_parents(commit.parent_ids().map(|id| id.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    /// Write `file`, stage it, and commit with explicit parents
    pub(crate) fn commit_file(
        repo: &Repository,
        update_ref: Option<&str>,
        message: &str,
        file: &str,
        parents: &[Oid],
    ) -> Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let workdir = repo.workdir().unwrap();
        let full = workdir.join(file);
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, message).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let parents: Vec<_> = parents.iter().map(|p| repo.find_commit(*p).unwrap()).collect();
        let parent_refs: Vec<_> = parents.iter().collect();
        repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    /// root -> main ---------> merge (HEAD)
    ///      \-> feat1 -> feat2 /
    pub(crate) struct MergeFixture {
        pub temp: TempDir,
        pub root: Oid,
        pub main: Oid,
        pub feat1: Oid,
        pub feat2: Oid,
        pub merge: Oid,
    }

    pub(crate) fn merge_fixture() -> MergeFixture {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let root = commit_file(&repo, Some("HEAD"), "chore: initial", "README.md", &[]);
        let feat1 = commit_file(&repo, None, "feat(ui): add button", "packages/ui/button.ts", &[root]);
        let feat2 = commit_file(&repo, None, "test(ui): cover button", "packages/ui/button.test.ts", &[feat1]);
        let main = commit_file(&repo, Some("HEAD"), "fix(api): null check", "packages/api/index.ts", &[root]);
        let merge = commit_file(
            &repo,
            Some("HEAD"),
            "Merge pull request #42 from acme/button\n\nAdd button component",
            "MERGED",
            &[main, feat2],
        );

        MergeFixture {
            temp,
            root,
            main,
            feat1,
            feat2,
            merge,
        }
    }

    #[test]
    fn test_whole_history() {
        let fixture = merge_fixture();
        let repo = GitRepo::open(fixture.temp.path()).unwrap();

        let hashes = repo.commits_in_range(&RevisionRange::head()).unwrap();
        assert_eq!(hashes.len(), 5);
        assert_eq!(hashes[0], fixture.merge.to_string());
        assert_eq!(hashes.last().unwrap(), &fixture.root.to_string());
    }

    #[test]
    fn test_second_parent_range() {
        let fixture = merge_fixture();
        let repo = GitRepo::open(fixture.temp.path()).unwrap();

        let range = RevisionRange::between(fixture.main.to_string(), fixture.feat2.to_string());
        let hashes = repo.commits_in_range(&range).unwrap();
        assert_eq!(
            hashes,
            vec![fixture.feat2.to_string(), fixture.feat1.to_string()]
        );
    }

    #[test]
    fn test_path_filter() {
        let fixture = merge_fixture();
        let repo = GitRepo::open(fixture.temp.path()).unwrap();

        let range = RevisionRange::since(fixture.root.to_string())
            .with_path(Some(Path::new("packages/api")));
        let hashes = repo.commits_in_range(&range).unwrap();
        assert_eq!(hashes, vec![fixture.main.to_string()]);
    }

    #[test]
    fn test_get_commit_reads_parents_and_body() {
        let fixture = merge_fixture();
        let repo = GitRepo::open(fixture.temp.path()).unwrap();

        let merge = repo.get_commit(&fixture.merge.to_string()).unwrap();
        assert_eq!(merge.message, "Merge pull request #42 from acme/button");
        assert_eq!(merge.body.as_deref(), Some("Add button component"));
        assert_eq!(
            merge.parents,
            vec![fixture.main.to_string(), fixture.feat2.to_string()]
        );
        assert_eq!(merge.author, "Test");
    }

    #[test]
    fn test_unknown_commit() {
        let fixture = merge_fixture();
        let repo = GitRepo::open(fixture.temp.path()).unwrap();

        assert!(matches!(
            repo.get_commit("0000000000000000000000000000000000000000"),
            Err(GitError::CommitNotFound(_))
        ));
        assert!(repo
            .commits_in_range(&RevisionRange::since("no-such-tag"))
            .is_err());
    }
}
