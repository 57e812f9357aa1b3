//! Markdown changelog formatter

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use cadence_core::config::ChangelogConfig;

use super::ChangelogFormatter;
use crate::categorizer::{CategorizedCommits, PrEntry};
use crate::document::VersionLabel;
use crate::parser::{CommitParser, ConventionalParser};
use crate::types::{Category, SemanticCommit};

const BREAKING_MARKER: &str = " ⚠️ BREAKING";

const BOILERPLATE: &str = "All notable changes to this project are documented in this file. \
Versions follow [Semantic Versioning](https://semver.org). Release sections are generated \
from commit history and are replaced as a whole when regenerated; sections for other \
releases are left untouched.";

/// Presentation settings for the markdown formatter
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title
    pub title: String,
    /// Badge snippets placed under the title
    pub badges: Vec<String>,
    /// Base URL for PR and commit links
    pub repository_url: Option<String>,
    /// Whether entries name their author
    pub include_authors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_changelog(&ChangelogConfig::default())
    }
}

impl RenderOptions {
    /// Take presentation settings from the changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            title: config.title.clone(),
            badges: config.badges.clone(),
            repository_url: config
                .repository_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            include_authors: config.include_authors,
        }
    }

    /// Set repository URL for links
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into().trim_end_matches('/').to_string());
        self
    }
}

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    options: RenderOptions,
    titles: ConventionalParser,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            titles: ConventionalParser::new(),
        }
    }

    fn commit_link(&self, commit: &SemanticCommit) -> String {
        match &self.options.repository_url {
            Some(url) => format!("[{}]({}/commit/{})", commit.short_hash, url, commit.hash),
            None => commit.short_hash.clone(),
        }
    }

    fn pr_link(&self, number: u64) -> String {
        match &self.options.repository_url {
            Some(url) => format!("[#{}]({}/pull/{})", number, url, number),
            None => format!("#{}", number),
        }
    }

    fn author(&self, commit: &SemanticCommit) -> String {
        if self.options.include_authors {
            format!(" by {}", commit.author)
        } else {
            String::new()
        }
    }

    /// Title for a PR entry
    ///
    /// Prefers a conventional PR title in the merge body, then the oldest
    /// conventional commit of the PR, then the raw merge text.
    fn pr_headline(&self, entry: &PrEntry) -> String {
        let merge = &entry.merge;
        if let Some(title) = merge.body_lines.first() {
            let parsed = self.titles.parse_message(title, None);
            if parsed.commit_type.is_conventional() {
                return parsed.headline();
            }
        }
        let pr_commits = entry.info().map(|pr| pr.pr_commits.as_slice()).unwrap_or_default();
        if let Some(commit) = pr_commits
            .iter()
            .rev()
            .find(|c| c.commit_type.is_conventional())
        {
            return commit.headline();
        }
        merge
            .body_lines
            .first()
            .cloned()
            .unwrap_or_else(|| merge.description.clone())
    }

    fn write_pr(&self, out: &mut String, category: Category, entry: &PrEntry) {
        let merge = &entry.merge;
        let _ = write!(out, "- {}", self.pr_headline(entry));
        if merge.is_breaking_deep() {
            out.push_str(BREAKING_MARKER);
        }
        let _ = write!(out, " `{}`", category);
        if let Some(number) = entry.info().and_then(|pr| pr.pr_number) {
            let _ = write!(out, " {}", self.pr_link(number));
        }
        let _ = write!(out, " ({}){}", self.commit_link(merge), self.author(merge));

        let count = entry.info().map(|pr| pr.pr_stats.commit_count).unwrap_or(0);
        let _ = write!(out, ", {} commit{}", count, if count == 1 { "" } else { "s" });

        match entry.commits.as_slice() {
            [] => out.push('\n'),
            [only] => {
                let _ = writeln!(out, " (`{}`)", only.short_hash);
            }
            commits => {
                let _ = write!(
                    out,
                    "\n  <details><summary>{} commits</summary>\n\n",
                    commits.len()
                );
                for commit in commits {
                    let _ = write!(out, "  - `{}` {}", commit.short_hash, commit.headline());
                    if self.options.include_authors {
                        let _ = write!(out, " ({})", commit.author);
                    }
                    out.push('\n');
                }
                out.push_str("\n  </details>\n");
            }
        }
    }

    fn write_orphan(&self, out: &mut String, commit: &SemanticCommit) {
        out.push_str("- ");
        if !commit.scopes.is_empty() {
            let _ = write!(out, "**{}:** ", commit.scopes.join(", "));
        }
        out.push_str(&commit.description);
        if commit.is_breaking {
            out.push_str(BREAKING_MARKER);
        }
        let _ = writeln!(out, "{} ({})", self.author(commit), self.commit_link(commit));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn preamble(&self) -> String {
        let mut out = format!("# {}\n", self.options.title);
        if !self.options.badges.is_empty() {
            let _ = write!(out, "\n{}\n", self.options.badges.join(" "));
        }
        let _ = write!(out, "\n{}\n", BOILERPLATE);
        out
    }

    #[instrument(skip(self, commits), fields(label = %label, commit_count = commits.len()))]
    fn format_release(
        &self,
        label: &VersionLabel,
        date: Option<NaiveDate>,
        commits: &CategorizedCommits,
    ) -> String {
        let mut out = label.header();
        if let Some(date) = date {
            let _ = write!(out, " - {}", date.format("%Y-%m-%d"));
        }
        out.push('\n');

        if commits.is_empty() {
            out.push_str("\nNo notable changes.\n");
            return out;
        }

        for (category, entries) in &commits.pull_requests {
            if entries.is_empty() {
                continue;
            }
            let _ = write!(out, "\n### Pull Requests: {}\n\n", category.title());
            for entry in entries {
                self.write_pr(&mut out, *category, entry);
            }
        }

        for (category, orphans) in &commits.orphans {
            if orphans.is_empty() {
                continue;
            }
            let _ = write!(out, "\n### {}\n\n", category.title());
            for commit in orphans {
                self.write_orphan(&mut out, commit);
            }
        }

        debug!(output_len = out.len(), "markdown release formatted");
        out
    }
}
