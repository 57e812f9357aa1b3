//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::manifest::ManifestKind;

/// Main configuration for Cadence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    pub name: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Engine limits
    pub engine: EngineConfig,

    /// Package configurations
    pub packages: Vec<PackageConfig>,

    /// Glob patterns (relative to the repository root) of package directories
    pub package_patterns: Vec<String>,
}

impl Config {
    /// Explicitly configured package by name
    pub fn package(&self, name: &str) -> Option<&PackageConfig> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Tag format (e.g., "v{version}")
    pub tag_format: String,

    /// Whether packages are versioned independently (tags become `name@version`)
    pub independent: bool,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            tag_format: "v{version}".to_string(),
            independent: false,
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path, relative to each package
    pub file: PathBuf,

    /// Document title
    pub title: String,

    /// Repository URL used for PR and commit links
    pub repository_url: Option<String>,

    /// Badge snippets rendered under the title
    pub badges: Vec<String>,

    /// Whether to include authors
    pub include_authors: bool,

    /// Whether to stamp release headers with a date
    pub include_dates: bool,

    /// Scopes that mark a commit as a dependency update
    pub dependency_scopes: Vec<String>,

    /// Verbs that mark a `chore` as a dependency update
    pub dependency_verbs: Vec<String>,

    /// Keywords that place `chore` commits under infrastructure
    pub infrastructure_keywords: Vec<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            title: "Changelog".to_string(),
            repository_url: None,
            badges: Vec::new(),
            include_authors: true,
            include_dates: false,
            dependency_scopes: vec![
                "deps".to_string(),
                "renovate".to_string(),
                "dependabot".to_string(),
            ],
            dependency_verbs: vec![
                "update".to_string(),
                "upgrade".to_string(),
                "bump".to_string(),
            ],
            infrastructure_keywords: vec![
                "ci".to_string(),
                "build".to_string(),
                "config".to_string(),
                "tooling".to_string(),
                "workflow".to_string(),
                "release".to_string(),
                "script".to_string(),
            ],
        }
    }
}

/// Limits for history walking and fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How deep nested PR merges are resolved
    pub max_pr_depth: usize,

    /// Upper bound on commits attributed to a single PR
    pub max_pr_commits: usize,

    /// Worker threads for PR resolution; 0 picks a default
    pub parallelism: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_pr_depth: 3,
            max_pr_commits: 500,
            parallelism: 0,
        }
    }
}

impl EngineConfig {
    /// Effective worker count for the fan-out pool
    pub fn worker_threads(&self) -> usize {
        if self.parallelism > 0 {
            return self.parallelism;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(8)
    }
}

/// Package-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package name
    pub name: String,

    /// Path to package (relative to repo root)
    pub path: PathBuf,

    /// Manifest type holding the version
    #[serde(rename = "type")]
    pub kind: ManifestKind,

    /// Package-specific tag format
    pub tag_format: Option<String>,
}
