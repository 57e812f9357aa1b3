//! Repository handle
//!
//! [`GitRepo`] owns a `git2::Repository` and the directory it was opened
//! from. Revision and commit queries live in `commits`, tag handling in
//! `tags`.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Oid, Repository};
use tracing::{debug, info, instrument};

use cadence_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// An opened git repository
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)
            .map_err(|e| open_error(e, || GitError::RepositoryNotFound(path.to_path_buf())))?;
        info!("opened git repository");
        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Open the repository containing `start_path`, searching upward
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path)
            .map_err(|e| open_error(e, || GitError::NotARepository(start_path.to_path_buf())))?;
        let path = match repo.workdir() {
            Some(workdir) => workdir.to_path_buf(),
            None => repo.path().to_path_buf(),
        };
        info!(root = %path.display(), "discovered git repository");
        Ok(Self { repo, path })
    }

    /// Working directory root, or the git directory for bare repositories
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commit HEAD points at
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }

    /// Resolve a revision (hash, tag, branch or `HEAD`) to a commit id
    pub fn resolve(&self, revision: &str) -> Result<Oid> {
        let invalid = || GitError::InvalidRevision(revision.to_string());
        let commit = self
            .repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| invalid())?;
        debug!(revision, oid = %commit.id(), "resolved revision");
        Ok(commit.id())
    }
}

fn open_error(err: git2::Error, not_found: impl FnOnce() -> GitError) -> GitError {
    if err.code() == ErrorCode::NotFound {
        not_found()
    } else {
        GitError::OpenFailed(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn empty_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_open_keeps_given_path() {
        let (temp, repo) = empty_repo();
        assert_eq!(repo.path(), temp.path());
        assert!(repo.head_commit().is_err());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // macOS reports /private/var for /var
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_plain_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            GitRepo::open(temp.path()),
            Err(GitError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_head_and_unknown() {
        let (_temp, repo) = empty_repo();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.repo.index().unwrap().write_tree().unwrap();
        let tree = repo.repo.find_tree(tree_id).unwrap();
        let oid = repo
            .repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        assert_eq!(repo.resolve("HEAD").unwrap(), oid);
        assert!(matches!(
            repo.resolve("does-not-exist"),
            Err(GitError::InvalidRevision(_))
        ));
    }
}
