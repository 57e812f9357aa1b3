//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{CadenceError, ConfigError, Result};

use super::types::Config;

/// Check a loaded configuration for values the engine cannot work with
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    check_tag_format("versioning.tag_format", &config.versioning.tag_format)?;

    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty"));
    }
    if let Some(url) = &config.changelog.repository_url {
        if url.ends_with('/') {
            return Err(invalid("changelog.repository_url", "must not end with '/'"));
        }
    }
    if config.engine.max_pr_commits == 0 {
        return Err(invalid("engine.max_pr_commits", "must be at least 1"));
    }

    let mut seen = HashSet::new();
    for (i, package) in config.packages.iter().enumerate() {
        let field = format!("packages[{}]", i);
        if package.name.is_empty() {
            return Err(invalid(format!("{}.name", field), "package name cannot be empty"));
        }
        if !seen.insert(package.name.as_str()) {
            return Err(invalid(
                format!("{}.name", field),
                format!("duplicate package name '{}'", package.name),
            ));
        }
        if let Some(format) = &package.tag_format {
            check_tag_format(&format!("{}.tag_format", field), format)?;
        }
    }

    debug!(packages = config.packages.len(), "configuration valid");
    Ok(())
}

fn check_tag_format(field: &str, format: &str) -> Result<()> {
    if format.contains("{version}") {
        Ok(())
    } else {
        Err(invalid(field, "must contain {version} placeholder"))
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> CadenceError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
    .into()
}
