//! Cadence Changelog - Commit intelligence and changelog rendering
//!
//! This crate turns raw commits into semantic records, recovers pull
//! requests from merge topology, buckets everything by category and renders
//! markdown release blocks that merge into an existing changelog.

pub mod categorizer;
pub mod document;
pub mod formatter;
pub mod parser;
pub mod resolver;
pub mod types;

pub use categorizer::{partition, CategorizedCommits, CategoryRules, PrEntry};
pub use document::{parse_version_header, ChangelogDocument, VersionLabel};
pub use formatter::{ChangelogFormatter, MarkdownFormatter, RenderOptions};
pub use parser::{CommitParser, ConventionalParser, ParserConfig};
pub use resolver::{worker_pool, PrResolver, ResolverLimits};
pub use types::{Category, CommitType, PrStats, PullRequestInfo, SemanticCommit};
