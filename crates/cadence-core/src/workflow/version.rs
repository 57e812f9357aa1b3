//! Release tag naming

use crate::config::Config;

/// Tag name for `version`
///
/// A package's own `tag_format` wins. Otherwise independently versioned
/// packages are tagged `<name>@<version>` and everything else shares the
/// repository-wide format.
pub fn format_tag(config: &Config, version: &str, package: Option<&str>) -> String {
    let template = match package {
        None => config.versioning.tag_format.clone(),
        Some(name) => match config.package(name).and_then(|p| p.tag_format.as_ref()) {
            Some(own) => own.clone(),
            None if config.versioning.independent => format!("{}@{{version}}", name),
            None => config.versioning.tag_format.clone(),
        },
    };
    template.replace("{version}", version)
}
