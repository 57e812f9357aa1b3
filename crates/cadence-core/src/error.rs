//! Error types for Cadence
//!
//! Each concern has its own enum; [`CadenceError`] wraps them transparently
//! so library code can use `?` across crate boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CadenceError
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Any failure surfaced by the Cadence libraries
#[derive(Debug, Error)]
pub enum CadenceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Other(String),
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found at or above {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures talking to the commit history
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Invalid revision '{0}'")]
    InvalidRevision(String),

    #[error("Tag already exists: {0}")]
    TagExists(String),

    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// A worker panicked while holding the repository
    #[error("Repository lock poisoned")]
    LockPoisoned,

    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version parsing failures
#[derive(Debug, Error)]
pub enum VersionError {
    /// Input and the parser's complaint
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, String),

    /// Version and the component that would overflow
    #[error("Cannot bump {0}: {1} version is at its maximum")]
    Overflow(String, &'static str),

    #[error("Semver error: {0}")]
    Semver(#[from] semver::Error),
}

/// Changelog file failures
#[derive(Debug, Error)]
pub enum ChangelogError {
    #[error("Failed to read changelog {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write changelog {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Package manifest failures
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Package manifest not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    #[error("Failed to update manifest: {0}")]
    Update(String),

    #[error("Unsupported package type: {0}")]
    UnsupportedType(String),
}

/// A failure scoped to one package's versioning session
#[derive(Debug, Error)]
#[error("package '{package}': {source}")]
pub struct SessionError {
    /// Package the session was running for
    pub package: String,
    /// Underlying failure
    #[source]
    pub source: CadenceError,
}

impl SessionError {
    /// Attach a package name to an error
    pub fn new(package: impl Into<String>, source: impl Into<CadenceError>) -> Self {
        Self {
            package: package.into(),
            source: source.into(),
        }
    }
}

impl CadenceError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
