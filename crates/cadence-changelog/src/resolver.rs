//! Pull request resolution
//!
//! A merge commit's PR is everything reachable from its second parent but
//! not from its first. Nested merges inside that range are resolved through
//! a breadth-first worklist bounded by `max_depth`.
//!
//! Nothing here fails the caller: lookups that fail become placeholders and
//! PRs that cannot be resolved are left as plain merge commits.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::LazyLock;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use regex::Regex;
use tracing::{debug, instrument, warn};

use cadence_core::config::EngineConfig;
use cadence_git::{CommitSource, RevisionRange};

use crate::categorizer::{categorize_pr, CategoryRules};
use crate::parser::CommitParser;
use crate::types::{PrStats, PullRequestInfo, SemanticCommit};

static MERGE_PR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Merge pull request #(\d+)").expect("Invalid regex"));

static ANY_PR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)\b").expect("Invalid regex"));

/// Extract a PR number from a merge subject, explicit merge form first
pub fn extract_pr_number(subject: &str) -> Option<u64> {
    [&*MERGE_PR_REGEX, &*ANY_PR_REGEX]
        .iter()
        .find_map(|re| re.captures(subject)?.get(1)?.as_str().parse().ok())
}

/// Build the worker pool used for commit lookups
pub fn worker_pool(threads: usize) -> Result<ThreadPool, ThreadPoolBuildError> {
    ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .thread_name(|i| format!("cadence-resolve-{}", i))
        .build()
}

/// Bounds on PR resolution
#[derive(Debug, Clone, Copy)]
pub struct ResolverLimits {
    /// Nesting levels below a top-level PR that are still resolved
    pub max_depth: usize,
    /// Commits kept per PR
    pub max_commits: usize,
}

impl From<&EngineConfig> for ResolverLimits {
    fn from(engine: &EngineConfig) -> Self {
        Self {
            max_depth: engine.max_pr_depth,
            max_commits: engine.max_pr_commits.max(1),
        }
    }
}

impl Default for ResolverLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// A parsed commit plus the raw fields PR resolution needs
struct Loaded {
    commit: SemanticCommit,
    subject: String,
    parents: Vec<String>,
}

struct Node {
    loaded: Loaded,
    pr_number: Option<u64>,
    /// Node indices of the PR's commits, once its range was read
    children: Option<Vec<usize>>,
}

impl Node {
    fn new(loaded: Loaded) -> Self {
        Self {
            loaded,
            pr_number: None,
            children: None,
        }
    }
}

/// Loads commits from a [`CommitSource`] and attaches PR info to merges
pub struct PrResolver<'a> {
    source: &'a dyn CommitSource,
    parser: &'a dyn CommitParser,
    rules: &'a CategoryRules,
    limits: ResolverLimits,
    pool: &'a ThreadPool,
    path: Option<&'a Path>,
}

impl<'a> PrResolver<'a> {
    /// Create a resolver
    pub fn new(
        source: &'a dyn CommitSource,
        parser: &'a dyn CommitParser,
        rules: &'a CategoryRules,
        limits: ResolverLimits,
        pool: &'a ThreadPool,
    ) -> Self {
        Self {
            source,
            parser,
            rules,
            limits,
            pool,
            path: None,
        }
    }

    /// Only count PR commits that touch `path`
    pub fn with_path(mut self, path: Option<&'a Path>) -> Self {
        self.path = path;
        self
    }

    /// Parse every commit of a range, in order, resolving PRs of merges
    #[instrument(skip_all, fields(commits = hashes.len()))]
    pub fn resolve_range(&self, hashes: &[String]) -> Vec<SemanticCommit> {
        let commits: Vec<SemanticCommit> = self.pool.install(|| {
            hashes
                .par_iter()
                .map(|hash| {
                    let loaded = self.load(hash);
                    if loaded.commit.is_merge {
                        self.resolve_merge(loaded)
                    } else {
                        loaded.commit
                    }
                })
                .collect()
        });

        debug!(
            merges = commits.iter().filter(|c| c.is_merge).count(),
            pull_requests = commits.iter().filter(|c| c.pr.is_some()).count(),
            "resolved range"
        );
        commits
    }

    /// Look up and parse one commit, degrading to a placeholder
    fn load(&self, hash: &str) -> Loaded {
        match self.source.commit(hash) {
            Ok(info) => Loaded {
                commit: self.parser.parse(&info),
                subject: info.message,
                parents: info.parents,
            },
            Err(e) => {
                warn!(hash, error = %e, "failed to load commit");
                Loaded {
                    commit: SemanticCommit::placeholder(hash),
                    subject: String::new(),
                    parents: Vec::new(),
                }
            }
        }
    }

    /// Resolve a merge commit's PR and any nested PRs inside it
    fn resolve_merge(&self, root: Loaded) -> SemanticCommit {
        let mut root = Node::new(root);
        let mut nodes: Vec<Node> = Vec::new();
        // `None` is the root merge, `Some(i)` a nested one
        let mut worklist: VecDeque<(Option<usize>, usize)> = VecDeque::from([(None, 0)]);

        while let Some((target, depth)) = worklist.pop_front() {
            let node = match target {
                None => &mut root,
                Some(idx) => &mut nodes[idx],
            };
            let Some(hashes) = self.branch_commits(node) else {
                continue;
            };

            let loaded: Vec<Loaded> = hashes.par_iter().map(|h| self.load(h)).collect();
            let mut children = Vec::with_capacity(loaded.len());
            for child in loaded {
                let idx = nodes.len();
                if child.commit.is_merge && depth < self.limits.max_depth {
                    worklist.push_back((Some(idx), depth + 1));
                }
                nodes.push(Node::new(child));
                children.push(idx);
            }

            match target {
                None => root.children = Some(children),
                Some(idx) => nodes[idx].children = Some(children),
            }
        }

        // children always sit after their parent, so finish back to front
        let mut finished: Vec<Option<SemanticCommit>> = Vec::new();
        finished.resize_with(nodes.len(), || None);
        for (idx, node) in nodes.into_iter().enumerate().rev() {
            finished[idx] = Some(self.finish(node, &mut finished));
        }
        self.finish(root, &mut finished)
    }

    /// Read the commit range a merge brought in, or `None` when it has no PR
    fn branch_commits(&self, node: &mut Node) -> Option<Vec<String>> {
        let hash = node.loaded.commit.hash.clone();
        let Some(number) = extract_pr_number(&node.loaded.subject) else {
            debug!(hash, "merge commit has no PR reference");
            return None;
        };
        let (Some(first), Some(second)) = (node.loaded.parents.first(), node.loaded.parents.get(1))
        else {
            warn!(hash, pr = number, "PR merge has no second parent");
            return None;
        };

        let range =
            RevisionRange::between(first.clone(), second.clone()).with_path(self.path);
        let mut hashes = match self.source.commits_in_range(&range) {
            Ok(hashes) => hashes,
            Err(e) => {
                warn!(hash, pr = number, error = %e, "failed to read PR commits");
                return None;
            }
        };
        if hashes.len() > self.limits.max_commits {
            warn!(
                hash,
                pr = number,
                total = hashes.len(),
                kept = self.limits.max_commits,
                "truncating PR commit list"
            );
            hashes.truncate(self.limits.max_commits);
        }

        node.pr_number = Some(number);
        Some(hashes)
    }

    fn finish(&self, node: Node, finished: &mut [Option<SemanticCommit>]) -> SemanticCommit {
        let Loaded {
            mut commit,
            subject,
            ..
        } = node.loaded;

        if let Some(children) = node.children {
            let pr_commits: Vec<SemanticCommit> = children
                .iter()
                .filter_map(|idx| finished[*idx].take())
                .collect();
            let pr_category = categorize_pr(&subject, &commit.body_lines, &pr_commits, self.rules);
            commit.pr = Some(PullRequestInfo {
                pr_number: node.pr_number,
                pr_category,
                pr_stats: PrStats {
                    commit_count: pr_commits.len(),
                },
                pr_commits,
            });
        }
        commit
    }
}
