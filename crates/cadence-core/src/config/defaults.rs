//! Default configuration values

/// Configuration file written by `cadence init`
pub const DEFAULT_CONFIG_YAML: &str = "cadence.yaml";

/// File names searched for, in order of preference
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    "cadence.toml",
    DEFAULT_CONFIG_YAML,
    ".cadence.yaml",
    ".cadence.toml",
];

/// Commented starter configuration
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Cadence configuration

versioning:
  # must contain {version}; independent mode tags packages as name@version
  tag_format: "v{version}"
  independent: false

changelog:
  file: CHANGELOG.md
  title: Changelog
  # repository_url: https://github.com/acme/app
  badges: []
  include_authors: true
  include_dates: false
  dependency_scopes: [deps, renovate, dependabot]
  dependency_verbs: [update, upgrade, bump]
  infrastructure_keywords: [ci, build, config, tooling, workflow, release, script]

engine:
  max_pr_depth: 3
  max_pr_commits: 500
  # 0 uses the available cores, capped at 8
  parallelism: 0

# packages:
#   - name: ui
#     path: packages/ui
#     type: npm
package_patterns: []
"#;
