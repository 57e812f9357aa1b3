//! Changelog types

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cadence_git::CommitInfo;

/// Commit type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// New feature
    Feat,
    /// Bug fix
    Fix,
    /// Documentation
    Docs,
    /// Code style (formatting, etc.)
    Style,
    /// Refactoring
    Refactor,
    /// Performance improvement
    Perf,
    /// Tests
    Test,
    /// Build system
    Build,
    /// CI configuration
    Ci,
    /// Chores (maintenance)
    Chore,
    /// Dependency updates
    Deps,
    /// Reverting changes
    Revert,
    /// Merge commit that did not follow the grammar
    Merge,
    /// Other/unknown
    Other,
}

impl CommitType {
    /// Lowercase name as written in commit subjects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
            Self::Deps => "deps",
            Self::Revert => "revert",
            Self::Merge => "merge",
            Self::Other => "other",
        }
    }

    /// Whether the type came from a conventional prefix
    pub fn is_conventional(&self) -> bool {
        !matches!(self, Self::Merge | Self::Other)
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" | "feature" => Ok(Self::Feat),
            "fix" | "bugfix" => Ok(Self::Fix),
            "docs" | "doc" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" | "performance" => Ok(Self::Perf),
            "test" | "tests" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            "deps" => Ok(Self::Deps),
            "revert" => Ok(Self::Revert),
            "merge" => Ok(Self::Merge),
            _ => Err(()),
        }
    }
}

/// Changelog category; declaration order is render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Breaking changes outside any PR
    Breaking,
    Features,
    Bugfixes,
    Dependencies,
    Infrastructure,
    Documentation,
    Refactoring,
    Other,
}

impl Category {
    /// Every category in render order
    pub const ALL: [Category; 8] = [
        Self::Breaking,
        Self::Features,
        Self::Bugfixes,
        Self::Dependencies,
        Self::Infrastructure,
        Self::Documentation,
        Self::Refactoring,
        Self::Other,
    ];

    /// Section heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::Breaking => "Breaking Changes",
            Self::Features => "Features",
            Self::Bugfixes => "Bug Fixes",
            Self::Dependencies => "Dependencies",
            Self::Infrastructure => "Infrastructure",
            Self::Documentation => "Documentation",
            Self::Refactoring => "Refactoring",
            Self::Other => "Other Changes",
        }
    }

    /// Short label used in badges and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Features => "features",
            Self::Bugfixes => "bugfixes",
            Self::Dependencies => "dependencies",
            Self::Infrastructure => "infrastructure",
            Self::Documentation => "documentation",
            Self::Refactoring => "refactoring",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message-level fields recovered from a commit subject and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    pub commit_type: CommitType,
    pub scopes: Vec<String>,
    pub description: String,
    pub body_lines: Vec<String>,
    pub is_breaking: bool,
    pub is_merge: bool,
    pub is_dependency: bool,
}

impl ParsedMessage {
    /// Subject line reassembled from the parsed fields
    pub fn headline(&self) -> String {
        compose_headline(self.commit_type, &self.scopes, &self.description)
    }
}

/// `type(scope1,scope2): description`, or the bare description when untyped
fn compose_headline(commit_type: CommitType, scopes: &[String], description: &str) -> String {
    if !commit_type.is_conventional() {
        description.to_string()
    } else if scopes.is_empty() {
        format!("{}: {}", commit_type, description)
    } else {
        format!("{}({}): {}", commit_type, scopes.join(","), description)
    }
}

/// A parsed commit with identity and semantic fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticCommit {
    /// Full commit hash
    pub hash: String,
    /// Abbreviated hash
    pub short_hash: String,
    /// Author name
    pub author: String,
    /// Commit date
    pub date: DateTime<Utc>,
    /// Conventional type, or `Other`/`Merge` when the grammar did not match
    pub commit_type: CommitType,
    /// Scopes in the order written
    pub scopes: Vec<String>,
    /// One-line summary
    pub description: String,
    /// Non-empty body lines
    pub body_lines: Vec<String>,
    pub is_breaking: bool,
    pub is_merge: bool,
    pub is_dependency: bool,
    /// Pull request this merge commit brought in
    pub pr: Option<PullRequestInfo>,
}

impl SemanticCommit {
    /// Combine commit identity with parsed message fields
    pub fn from_parts(commit: &CommitInfo, parsed: ParsedMessage) -> Self {
        Self {
            hash: commit.hash.clone(),
            short_hash: commit.short_hash.clone(),
            author: commit.author.clone(),
            date: commit.timestamp,
            commit_type: parsed.commit_type,
            scopes: parsed.scopes,
            description: parsed.description,
            body_lines: parsed.body_lines,
            is_breaking: parsed.is_breaking,
            is_merge: parsed.is_merge,
            is_dependency: parsed.is_dependency,
            pr: None,
        }
    }

    /// Stand-in for a commit whose lookup failed
    pub fn placeholder(hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            short_hash: cadence_git::types::short_hash(hash),
            author: "unknown".to_string(),
            date: DateTime::<Utc>::default(),
            commit_type: CommitType::Other,
            scopes: Vec::new(),
            description: "Failed to parse commit".to_string(),
            body_lines: Vec::new(),
            is_breaking: false,
            is_merge: false,
            is_dependency: false,
            pr: None,
        }
    }

    /// Subject line reassembled from the parsed fields
    pub fn headline(&self) -> String {
        compose_headline(self.commit_type, &self.scopes, &self.description)
    }

    /// Whether this commit or anything its PR brought in is breaking
    pub fn is_breaking_deep(&self) -> bool {
        self.is_breaking
            || self
                .pr
                .as_ref()
                .is_some_and(|pr| pr.pr_commits.iter().any(|c| c.is_breaking))
    }
}

/// Pull request recovered from a merge commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    pub pr_number: Option<u64>,
    pub pr_category: Category,
    /// Commits on the merged branch, merge commit excluded
    pub pr_commits: Vec<SemanticCommit>,
    pub pr_stats: PrStats,
}

/// Counters reported alongside a PR
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrStats {
    pub commit_count: usize,
}
