//! Package discovery
//!
//! Packages come from explicit `packages` entries, from `package_patterns`
//! globs, or, when neither is configured, from the manifest at the
//! repository root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::manifest::{read_identity, ManifestKind};
use crate::types::PackageInfo;

/// Discover all packages the engine should version
pub fn discover_packages(root: &Path, config: &Config) -> Result<Vec<PackageInfo>> {
    debug!(
        root = %root.display(),
        explicit = config.packages.len(),
        patterns = config.package_patterns.len(),
        "discovering packages"
    );
    let mut packages = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pkg in &config.packages {
        let manifest_path = root.join(&pkg.path).join(pkg.kind.file_name());
        seen.insert(pkg.path.clone());
        packages.push(PackageInfo::new(
            pkg.name.clone(),
            pkg.path.clone(),
            pkg.kind,
            manifest_path,
        ));
    }

    for pattern in &config.package_patterns {
        let full_pattern = root.join(pattern).to_string_lossy().to_string();
        let entries = glob(&full_pattern).map_err(|e| ConfigError::InvalidValue {
            field: "package_patterns".to_string(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let dir = entry.map_err(|e| ConfigError::InvalidValue {
                field: "package_patterns".to_string(),
                message: e.to_string(),
            })?;
            if !dir.is_dir() {
                continue;
            }
            let relative = dir.strip_prefix(root).unwrap_or(&dir).to_path_buf();
            if seen.contains(&relative) {
                continue;
            }
            match package_at(root, &relative)? {
                Some(pkg) => {
                    seen.insert(relative);
                    packages.push(pkg);
                }
                None => debug!(dir = %dir.display(), "no manifest in matched directory"),
            }
        }
    }

    if packages.is_empty() {
        match package_at(root, Path::new("."))? {
            Some(pkg) => packages.push(pkg),
            None => warn!(root = %root.display(), "no package manifest found at repository root"),
        }
    }

    info!(count = packages.len(), "discovered packages");
    Ok(packages)
}

/// Build package info for a directory holding a manifest
fn package_at(root: &Path, relative: &Path) -> Result<Option<PackageInfo>> {
    let dir = root.join(relative);
    let Some(kind) = ManifestKind::detect(&dir) else {
        return Ok(None);
    };
    let manifest_path = dir.join(kind.file_name());

    let name = read_identity(kind, &manifest_path)?.name.unwrap_or_else(|| {
        dir.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "root".to_string())
    });

    Ok(Some(PackageInfo::new(
        name,
        relative.to_path_buf(),
        kind,
        manifest_path,
    )))
}
