//! Configuration loading
//!
//! Files are searched from the working directory upward. At each level the
//! directory itself is checked before its `.github/` folder, and the first
//! hit wins.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::CONFIG_FILE_NAMES;
use super::types::Config;
use super::validation::validate_config;

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Format implied by a file extension; anything but `.toml` is YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Config, ConfigError> {
        match self {
            Self::Toml => Ok(toml::from_str(content)?),
            Self::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = ConfigFormat::from_path(path);
    info!(path = %path.display(), ?format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = format.parse(&content)?;
    validate_config(&config)?;

    debug!(
        packages = config.packages.len(),
        patterns = config.package_patterns.len(),
        "config loaded"
    );
    Ok(config)
}

/// Locate the nearest configuration file at or above `start_dir`
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let found = start_dir.ancestors().find_map(|dir| {
        [dir.to_path_buf(), dir.join(".github")]
            .into_iter()
            .flat_map(|base| CONFIG_FILE_NAMES.iter().map(move |name| base.join(name)))
            .find(|candidate| candidate.is_file())
    });

    match &found {
        Some(path) => info!(path = %path.display(), "found config file"),
        None => debug!(start_dir = %start_dir.display(), "no config file found"),
    }
    found
}

/// Load the nearest configuration, returning it with its path
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;
    let config = load_config(&path)?;
    Ok((config, path))
}

/// Load the nearest configuration, falling back to defaults
pub fn load_config_or_default(dir: &Path) -> (Config, Option<PathBuf>) {
    match load_config_from_dir(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "using default configuration");
            (Config::default(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("cadence.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new(".cadence.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("cadence")), ConfigFormat::Yaml);
    }

    #[test]
    fn test_toml_wins_within_a_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("cadence.yaml"), "changelog:\n  title: B").unwrap();
        std::fs::write(temp.path().join("cadence.toml"), "[changelog]\ntitle = \"A\"").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, temp.path().join("cadence.toml"));
        assert_eq!(load_config(&found).unwrap().changelog.title, "A");
    }

    #[test]
    fn test_search_walks_up_into_github_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".github")).unwrap();
        let config_path = temp.path().join(".github").join("cadence.yaml");
        std::fs::write(&config_path, "changelog:\n  title: Releases").unwrap();

        let nested = temp.path().join("packages").join("ui");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = load_config_from_dir(&nested).unwrap();
        assert_eq!(path, config_path);
        assert_eq!(config.changelog.title, "Releases");
    }

    #[test]
    fn test_directory_beats_github_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join(".github")).unwrap();
        std::fs::write(temp.path().join(".github").join("cadence.toml"), "").unwrap();
        std::fs::write(temp.path().join(".cadence.yaml"), "").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, temp.path().join(".cadence.yaml"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadence.toml");
        std::fs::write(
            &path,
            "[changelog]\nrepository_url = \"https://github.com/acme/app\"\n\n[engine]\nmax_pr_depth = 5\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(
            config.changelog.repository_url.as_deref(),
            Some("https://github.com/acme/app")
        );
        assert_eq!(config.engine.max_pr_depth, 5);
        assert_eq!(config.engine.max_pr_commits, 500);
        assert_eq!(config.versioning.tag_format, "v{version}");
    }

    #[test]
    fn test_yaml_packages() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadence.yaml");
        std::fs::write(
            &path,
            "versioning:\n  independent: true\npackages:\n  - name: ui\n    path: packages/ui\n    type: npm\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert!(config.versioning.independent);
        assert_eq!(config.packages[0].name, "ui");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cadence.yaml");
        std::fs::write(&path, "versioning:\n  tag_format: release\n").unwrap();
        assert!(load_config(&path).is_err());

        let (config, found) = load_config_or_default(temp.path());
        assert!(found.is_none());
        assert_eq!(config.versioning.tag_format, "v{version}");
    }
}
