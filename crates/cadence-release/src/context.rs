//! Run context
//!
//! Everything a run needs is gathered once up front and passed to each
//! session by reference: configuration, repository root, the packages to
//! version, the commit history and the release date. Sessions never reach
//! for ambient state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, instrument};

use cadence_core::config::Config;
use cadence_core::types::PackageInfo;
use cadence_core::{discover_packages, Result};
use cadence_git::{web_url_from_remote, CommitSource, SharedRepo};

/// Inputs shared by every package session of one run
pub struct RunContext {
    /// Loaded configuration
    pub config: Config,

    /// Repository root; package paths are relative to it
    pub root: PathBuf,

    /// Packages to version
    pub packages: Vec<PackageInfo>,

    /// Commit history
    pub source: Arc<dyn CommitSource>,

    /// Repository used to create release tags, when history is a git repo
    pub tagger: Option<Arc<SharedRepo>>,

    /// Date stamped on release headers
    pub release_date: Option<NaiveDate>,

    /// Base URL for PR and commit links
    pub repository_url: Option<String>,
}

impl RunContext {
    /// Create a context over an arbitrary commit source
    pub fn new(config: Config, root: impl Into<PathBuf>, source: Arc<dyn CommitSource>) -> Self {
        let repository_url = config.changelog.repository_url.clone();
        Self {
            config,
            root: root.into(),
            packages: Vec::new(),
            source,
            tagger: None,
            release_date: None,
            repository_url,
        }
    }

    /// Open the git repository containing `dir` and discover its packages
    #[instrument(skip(config), fields(dir = %dir.display()))]
    pub fn discover(dir: &Path, config: Config) -> Result<Self> {
        let repo = Arc::new(SharedRepo::discover(dir)?);
        let root = repo.root()?;
        let packages = discover_packages(&root, &config)?;

        let repository_url = config.changelog.repository_url.clone().or_else(|| {
            let remote = repo.remote_url("origin").ok().flatten()?;
            let url = web_url_from_remote(&remote);
            debug!(remote = %remote, url = ?url, "derived repository url from origin");
            url
        });
        let release_date = config
            .changelog
            .include_dates
            .then(|| Utc::now().date_naive());

        info!(
            root = %root.display(),
            packages = packages.len(),
            "run context ready"
        );

        Ok(Self {
            config,
            root,
            packages,
            source: repo.clone(),
            tagger: Some(repo),
            release_date,
            repository_url,
        })
    }

    /// Set the packages to version
    pub fn with_packages(mut self, packages: Vec<PackageInfo>) -> Self {
        self.packages = packages;
        self
    }

    /// Set the release date
    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    /// Find a package by name
    pub fn package(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Changelog file for a package
    pub fn changelog_path(&self, package: &PackageInfo) -> PathBuf {
        if package.is_root() {
            self.root.join(&self.config.changelog.file)
        } else {
            self.root
                .join(&package.path)
                .join(&self.config.changelog.file)
        }
    }

    /// Manifest file for a package
    pub fn manifest_path(&self, package: &PackageInfo) -> PathBuf {
        if package.manifest_path.is_absolute() {
            package.manifest_path.clone()
        } else {
            self.root.join(&package.manifest_path)
        }
    }
}
