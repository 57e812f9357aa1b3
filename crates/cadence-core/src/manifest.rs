//! Package manifest access
//!
//! Reads and writes the version field of `package.json` and `Cargo.toml`
//! manifests. Writes preserve key order and formatting.

use std::path::Path;

use serde::{Deserialize, Serialize};
use toml_edit::{value, DocumentMut};
use tracing::{debug, info};

use crate::error::{ManifestError, Result};

/// Manifest flavour that carries a package version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    /// `package.json`
    Npm,
    /// `Cargo.toml`
    Cargo,
}

impl ManifestKind {
    /// Manifest file name for this kind
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Npm => "package.json",
            Self::Cargo => "Cargo.toml",
        }
    }

    /// Detect the manifest kind present in a directory
    pub fn detect(dir: &Path) -> Option<Self> {
        [Self::Npm, Self::Cargo]
            .into_iter()
            .find(|kind| dir.join(kind.file_name()).is_file())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Cargo => "cargo",
        }
    }
}

impl std::fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ManifestKind {
    type Err = ManifestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "npm" | "node" => Ok(Self::Npm),
            "cargo" | "rust" => Ok(Self::Cargo),
            other => Err(ManifestError::UnsupportedType(other.to_string())),
        }
    }
}

/// Name and version read from a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestIdentity {
    /// Package name, if declared
    pub name: Option<String>,
    /// Package version
    pub version: String,
}

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

#[derive(Deserialize)]
struct CargoToml {
    package: Option<CargoPackage>,
}

#[derive(Deserialize)]
struct CargoPackage {
    name: String,
    version: Option<toml::Value>,
}

/// Read the package name and version from a manifest
pub fn read_identity(kind: ManifestKind, path: &Path) -> Result<ManifestIdentity> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| ManifestError::NotFound(path.to_path_buf()))?;

    let identity = match kind {
        ManifestKind::Npm => {
            let pkg: PackageJson = serde_json::from_str(&content)
                .map_err(|e| ManifestError::Parse(e.to_string()))?;
            let version = pkg.version.ok_or_else(|| {
                ManifestError::Parse(format!(
                    "{} has no version field",
                    path.display()
                ))
            })?;
            ManifestIdentity {
                name: pkg.name,
                version,
            }
        }
        ManifestKind::Cargo => {
            let cargo: CargoToml = toml::from_str(&content)
                .map_err(|e| ManifestError::Parse(e.to_string()))?;
            let package = cargo.package.ok_or_else(|| {
                ManifestError::Parse("No [package] section found".to_string())
            })?;
            let version = match package.version {
                Some(toml::Value::String(v)) => v,
                Some(_) => {
                    return Err(ManifestError::Parse(format!(
                        "{} inherits its version from the workspace",
                        path.display()
                    ))
                    .into())
                }
                None => "0.0.0".to_string(),
            };
            ManifestIdentity {
                name: Some(package.name),
                version,
            }
        }
    };

    debug!(path = %path.display(), version = %identity.version, "read manifest");
    Ok(identity)
}

/// Read the current version from a manifest
pub fn read_version(kind: ManifestKind, path: &Path) -> Result<String> {
    Ok(read_identity(kind, path)?.version)
}

/// Write a new version into a manifest
pub fn write_version(kind: ManifestKind, path: &Path, version: &str) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| ManifestError::NotFound(path.to_path_buf()))?;

    let updated = match kind {
        ManifestKind::Npm => {
            let mut doc: serde_json::Value = serde_json::from_str(&content)
                .map_err(|e| ManifestError::Parse(e.to_string()))?;
            let object = doc.as_object_mut().ok_or_else(|| {
                ManifestError::Parse("package.json is not an object".to_string())
            })?;
            object.insert(
                "version".to_string(),
                serde_json::Value::String(version.to_string()),
            );
            let mut out = serde_json::to_string_pretty(&doc)
                .map_err(|e| ManifestError::Update(e.to_string()))?;
            out.push('\n');
            out
        }
        ManifestKind::Cargo => {
            let mut doc: DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
                ManifestError::Parse(e.to_string())
            })?;
            match doc.get_mut("package").and_then(|p| p.as_table_mut()) {
                Some(table) => table["version"] = value(version),
                None => {
                    return Err(ManifestError::Parse(
                        "No [package] section found".to_string(),
                    )
                    .into())
                }
            }
            doc.to_string()
        }
    };

    std::fs::write(path, updated).map_err(|e| ManifestError::Update(e.to_string()))?;
    info!(path = %path.display(), version, "manifest version updated");
    Ok(())
}
