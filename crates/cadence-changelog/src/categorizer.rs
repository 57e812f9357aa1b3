//! Commit categorization
//!
//! Two pure functions decide where a commit shows up in the changelog:
//! [`categorize_pr`] scores a pull request by its commits, and
//! [`orphan_category`] maps a commit outside any PR. [`partition`] applies
//! both to a whole range so every commit lands in exactly one bucket.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, instrument};

use cadence_core::config::ChangelogConfig;

use crate::parser::{mentions_any, words};
use crate::types::{Category, CommitType, PullRequestInfo, SemanticCommit};

const BOT_SIGNATURES: [&str; 2] = ["renovate", "dependabot"];
const DEPENDENCY_WORDS: [&str; 2] = ["dependenc", "deps"];

/// Keyword vocabulary used when a commit type alone is not decisive
#[derive(Debug, Clone)]
pub struct CategoryRules {
    /// Words marking a `chore` as infrastructure work
    pub infrastructure_keywords: Vec<String>,
    /// Words marking a `chore` as a dependency update
    pub dependency_keywords: Vec<String>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::from_changelog(&ChangelogConfig::default())
    }
}

impl CategoryRules {
    /// Build rules from the changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            infrastructure_keywords: config
                .infrastructure_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            dependency_keywords: DEPENDENCY_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn is_dependency(&self, commit: &SemanticCommit) -> bool {
        commit.is_dependency || mentions_any(&commit.description, &self.dependency_keywords)
    }

    fn is_infrastructure(&self, commit: &SemanticCommit) -> bool {
        mentions_any(&commit.description, &self.infrastructure_keywords)
    }

    /// Category for `chore`/`deps` commits, if any
    fn maintenance_category(&self, commit: &SemanticCommit) -> Option<Category> {
        if self.is_dependency(commit) {
            Some(Category::Dependencies)
        } else if self.is_infrastructure(commit) {
            Some(Category::Infrastructure)
        } else {
            None
        }
    }
}

/// Points a single PR commit contributes, if any
fn score(commit: &SemanticCommit, rules: &CategoryRules) -> Option<(Category, u32)> {
    match commit.commit_type {
        CommitType::Feat => Some((Category::Features, 3)),
        CommitType::Fix => Some((Category::Bugfixes, 2)),
        CommitType::Docs => Some((Category::Documentation, 2)),
        CommitType::Refactor | CommitType::Style | CommitType::Perf => {
            Some((Category::Refactoring, 2))
        }
        CommitType::Ci | CommitType::Build => Some((Category::Infrastructure, 3)),
        CommitType::Chore | CommitType::Deps => match rules.maintenance_category(commit)? {
            Category::Dependencies => Some((Category::Dependencies, 5)),
            category => Some((category, 2)),
        },
        CommitType::Test | CommitType::Revert | CommitType::Merge | CommitType::Other => None,
    }
}

/// Whether a merge message carries a dependency-bot signature
fn has_bot_signature(subject: &str, body_lines: &[String]) -> bool {
    let lower_subject = subject.to_lowercase();
    let in_text = |text: &str| BOT_SIGNATURES.iter().any(|sig| text.contains(sig));
    if in_text(&lower_subject) {
        return true;
    }
    body_lines.iter().any(|line| {
        let lower = line.to_lowercase();
        in_text(&lower) || words(line).any(|w| w.starts_with("dependenc"))
    })
}

/// Pick the category of a pull request from its merge message and commits
///
/// Ties go to the category declared first; all-zero scores give `Other`.
pub fn categorize_pr(
    subject: &str,
    body_lines: &[String],
    commits: &[SemanticCommit],
    rules: &CategoryRules,
) -> Category {
    if has_bot_signature(subject, body_lines) {
        return Category::Dependencies;
    }

    let mut scores = [0u32; Category::ALL.len()];
    for commit in commits {
        if let Some((category, points)) = score(commit, rules) {
            scores[category as usize] += points;
        }
    }

    let mut best = Category::Other;
    let mut best_score = 0;
    for category in Category::ALL {
        let value = scores[category as usize];
        if value > best_score {
            best = category;
            best_score = value;
        }
    }
    best
}

/// Category of a commit that is not part of any pull request
pub fn orphan_category(commit: &SemanticCommit, rules: &CategoryRules) -> Category {
    if commit.is_breaking {
        return Category::Breaking;
    }
    match commit.commit_type {
        CommitType::Feat => Category::Features,
        CommitType::Fix => Category::Bugfixes,
        CommitType::Docs => Category::Documentation,
        CommitType::Refactor | CommitType::Style => Category::Refactoring,
        CommitType::Test => Category::Infrastructure,
        CommitType::Chore | CommitType::Deps => rules
            .maintenance_category(commit)
            .unwrap_or(Category::Other),
        CommitType::Perf
        | CommitType::Build
        | CommitType::Ci
        | CommitType::Revert
        | CommitType::Merge
        | CommitType::Other => Category::Other,
    }
}

/// A top-level pull request and the range commits it absorbed
#[derive(Debug, Clone, Serialize)]
pub struct PrEntry {
    /// The merge commit carrying the PR info
    pub merge: SemanticCommit,
    /// Commits of this range attributed to the PR
    pub commits: Vec<SemanticCommit>,
}

impl PrEntry {
    /// PR info of the merge commit
    pub fn info(&self) -> Option<&PullRequestInfo> {
        self.merge.pr.as_ref()
    }

    /// Number of range commits this entry accounts for, merge included
    pub fn len(&self) -> usize {
        1 + self.commits.len()
    }

    /// Always false; an entry holds at least its merge commit
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A commit range split into PR and orphan buckets
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategorizedCommits {
    pub pull_requests: BTreeMap<Category, Vec<PrEntry>>,
    pub orphans: BTreeMap<Category, Vec<SemanticCommit>>,
}

impl CategorizedCommits {
    /// Total commits across all buckets
    pub fn len(&self) -> usize {
        let in_prs: usize = self
            .pull_requests
            .values()
            .flat_map(|entries| entries.iter().map(PrEntry::len))
            .sum();
        let orphans: usize = self.orphans.values().map(Vec::len).sum();
        in_prs + orphans
    }

    /// Whether no commit was categorized
    pub fn is_empty(&self) -> bool {
        self.pull_requests.is_empty() && self.orphans.is_empty()
    }

    /// Per-bucket commit counts, PR buckets prefixed with `pr:`
    pub fn bucket_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for (category, entries) in &self.pull_requests {
            let total = entries.iter().map(PrEntry::len).sum();
            counts.insert(format!("pr:{}", category), total);
        }
        for (category, commits) in &self.orphans {
            counts.insert(category.to_string(), commits.len());
        }
        counts
    }
}

fn collect_nested<'a>(pr: &'a PullRequestInfo, into: &mut HashSet<&'a str>) {
    for commit in &pr.pr_commits {
        into.insert(commit.hash.as_str());
        if let Some(inner) = &commit.pr {
            collect_nested(inner, into);
        }
    }
}

/// Split a commit range into PR and orphan buckets
#[instrument(skip_all, fields(commits = commits.len()))]
pub fn partition(commits: &[SemanticCommit], rules: &CategoryRules) -> CategorizedCommits {
    let by_hash: HashMap<&str, &SemanticCommit> =
        commits.iter().map(|c| (c.hash.as_str(), c)).collect();

    let mut nested: HashSet<&str> = HashSet::new();
    for pr in commits.iter().filter_map(|c| c.pr.as_ref()) {
        collect_nested(pr, &mut nested);
    }

    let mut result = CategorizedCommits::default();
    let mut absorbed: HashSet<&str> = HashSet::new();

    for commit in commits {
        let Some(pr) = &commit.pr else { continue };
        if nested.contains(commit.hash.as_str()) || !absorbed.insert(commit.hash.as_str()) {
            continue;
        }

        let mut entry = PrEntry {
            merge: commit.clone(),
            commits: Vec::new(),
        };
        for pr_commit in &pr.pr_commits {
            let hash = pr_commit.hash.as_str();
            if let Some(in_range) = by_hash.get(hash) {
                if absorbed.insert(hash) {
                    entry.commits.push((*in_range).clone());
                }
            }
        }
        result
            .pull_requests
            .entry(pr.pr_category)
            .or_default()
            .push(entry);
    }

    for commit in commits {
        if absorbed.contains(commit.hash.as_str()) {
            continue;
        }
        result
            .orphans
            .entry(orphan_category(commit, rules))
            .or_default()
            .push(commit.clone());
    }

    debug!(
        pull_requests = result.pull_requests.values().map(Vec::len).sum::<usize>(),
        orphans = result.orphans.values().map(Vec::len).sum::<usize>(),
        "partitioned commits"
    );
    result
}
