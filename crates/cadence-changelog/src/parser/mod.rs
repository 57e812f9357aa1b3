//! Commit parsing

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;
pub(crate) use types::{mentions_any, words};

use crate::types::{ParsedMessage, SemanticCommit};
use cadence_git::CommitInfo;

/// Trait for commit parsers
///
/// Parsing never fails: messages outside the grammar degrade to an
/// untyped record.
pub trait CommitParser: Send + Sync {
    /// Parse a subject line and optional body into message fields
    fn parse_message(&self, subject: &str, body: Option<&str>) -> ParsedMessage;

    /// Parse a commit, keeping its identity fields
    fn parse(&self, commit: &CommitInfo) -> SemanticCommit {
        let parsed = self.parse_message(&commit.message, commit.body.as_deref());
        SemanticCommit::from_parts(commit, parsed)
    }
}
