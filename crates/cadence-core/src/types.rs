//! Core types for Cadence

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::manifest::ManifestKind;

/// A versioned package the engine runs a session for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package name
    pub name: String,
    /// Package directory, relative to the repository root
    pub path: PathBuf,
    /// Manifest flavour holding the version
    pub kind: ManifestKind,
    /// Path to the package manifest
    pub manifest_path: PathBuf,
}

impl PackageInfo {
    /// Create new package info
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        kind: ManifestKind,
        manifest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind,
            manifest_path: manifest_path.into(),
        }
    }

    /// Whether the package lives at the repository root
    pub fn is_root(&self) -> bool {
        self.path.as_os_str().is_empty() || self.path == Path::new(".")
    }

    /// Path filter to apply to revision queries, if any
    pub fn path_filter(&self) -> Option<&Path> {
        if self.is_root() {
            None
        } else {
            Some(&self.path)
        }
    }
}
