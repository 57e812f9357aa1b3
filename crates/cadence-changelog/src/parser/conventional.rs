//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;

use super::types::mentions_any;
use super::{CommitParser, ParserConfig};
use crate::types::{CommitType, ParsedMessage};

/// Regex for parsing conventional commit subjects
static CONVENTIONAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[a-zA-Z]+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?:\s*(?P<description>\S.*)$",
    )
    .expect("Invalid regex")
});

const MERGE_MARKERS: [&str; 2] = ["Merge pull request", "Merge branch"];
const BREAKING_MARKERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    config: ParserConfig,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    fn is_dependency(
        &self,
        subject: &str,
        commit_type: CommitType,
        scopes: &[String],
        description: &str,
    ) -> bool {
        let lower = subject.to_lowercase();
        if lower.starts_with("deps:") || lower.starts_with("deps(") {
            return true;
        }
        if commit_type == CommitType::Deps {
            return true;
        }
        if scopes
            .iter()
            .any(|s| self.config.dependency_scopes.contains(&s.to_lowercase()))
        {
            return true;
        }
        commit_type == CommitType::Chore
            && mentions_any(description, &self.config.dependency_verbs)
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitParser for ConventionalParser {
    fn parse_message(&self, subject: &str, body: Option<&str>) -> ParsedMessage {
        let subject = subject.trim();
        let body_lines: Vec<String> = body
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let is_merge = MERGE_MARKERS.iter().any(|m| subject.starts_with(m));
        let breaking_in_body = body_lines
            .iter()
            .any(|l| BREAKING_MARKERS.iter().any(|m| l.starts_with(m)));

        let matched = CONVENTIONAL_REGEX.captures(subject).and_then(|caps| {
            let commit_type: CommitType = caps.name("type")?.as_str().parse().ok()?;
            Some((
                commit_type,
                caps.name("scope").map(|m| m.as_str()).unwrap_or_default(),
                caps.name("breaking").is_some(),
                caps.name("description")?.as_str().trim().to_string(),
            ))
        });

        let (commit_type, scopes, bang, description) = match matched {
            Some((commit_type, scope, bang, description)) => {
                let scopes = scope
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                (commit_type, scopes, bang, description)
            }
            None => {
                let fallback = if is_merge {
                    CommitType::Merge
                } else {
                    CommitType::Other
                };
                let flattened = std::iter::once(subject)
                    .chain(body_lines.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");
                (fallback, Vec::new(), false, flattened)
            }
        };

        let is_dependency = self.is_dependency(subject, commit_type, &scopes, &description);

        ParsedMessage {
            commit_type,
            scopes,
            description,
            body_lines,
            is_breaking: bang || breaking_in_body,
            is_merge,
            is_dependency,
        }
    }
}
