//! Changelog formatters

mod markdown;

pub use markdown::{MarkdownFormatter, RenderOptions};

use chrono::NaiveDate;

use crate::categorizer::CategorizedCommits;
use crate::document::VersionLabel;

/// Trait for changelog formatters
///
/// Output must depend only on the arguments, so repeated runs over the same
/// range produce identical text.
pub trait ChangelogFormatter: Send + Sync {
    /// Document preamble emitted once per render
    fn preamble(&self) -> String;

    /// Render one release block, header line included
    fn format_release(
        &self,
        label: &VersionLabel,
        date: Option<NaiveDate>,
        commits: &CategorizedCommits,
    ) -> String;

    /// Preamble plus one release block
    fn render(
        &self,
        label: &VersionLabel,
        date: Option<NaiveDate>,
        commits: &CategorizedCommits,
    ) -> String {
        format!(
            "{}\n\n{}",
            self.preamble().trim_end(),
            self.format_release(label, date, commits)
        )
    }
}
