//! Changelog documents
//!
//! A changelog is a preamble followed by release blocks, each starting with
//! a `## ` version header. [`parse_version_header`] is the only place that
//! decides what counts as a header; the version guards and the merger all
//! go through it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::debug;

static VERSION_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^##\s+\[?(?:(?i:(?P<unreleased>unreleased))|v?(?P<version>\d+\.\d+\.\d+(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?))(?:\]\([^)]*\)|\])?(?:\s.*)?$",
    )
    .expect("Invalid regex")
});

/// Label of a release block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionLabel {
    Unreleased,
    Version(Version),
}

impl VersionLabel {
    /// Markdown header line for this label
    pub fn header(&self) -> String {
        format!("## {}", self)
    }

    /// Version, unless this is the unreleased block
    pub fn version(&self) -> Option<&Version> {
        match self {
            Self::Unreleased => None,
            Self::Version(v) => Some(v),
        }
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreleased => f.write_str("Unreleased"),
            Self::Version(v) => write!(f, "v{}", v),
        }
    }
}

/// `Unreleased` first, then versions newest first
impl Ord for VersionLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Unreleased, Self::Unreleased) => Ordering::Equal,
            (Self::Unreleased, Self::Version(_)) => Ordering::Less,
            (Self::Version(_), Self::Unreleased) => Ordering::Greater,
            (Self::Version(a), Self::Version(b)) => b.cmp(a),
        }
    }
}

impl PartialOrd for VersionLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Recognise a release header line
///
/// Accepts `## Unreleased`, `## [Unreleased]`, `## v1.2.3`, `## 1.2.3`,
/// `## [1.2.3] - 2024-01-01`, the linked form
/// `## [1.2.3](https://host/compare/v1.2.2...v1.2.3) (2024-01-01)` and
/// similar. Other `##` headings are not release headers.
pub fn parse_version_header(line: &str) -> Option<VersionLabel> {
    let caps = VERSION_HEADER_REGEX.captures(line.trim_end())?;
    if caps.name("unreleased").is_some() {
        return Some(VersionLabel::Unreleased);
    }
    let version = Version::parse(caps.name("version")?.as_str()).ok()?;
    Some(VersionLabel::Version(version))
}

/// A changelog split into its preamble and release blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    preamble: String,
    /// `## ` sections before the first release block that carry no version
    unlabelled: String,
    /// Blocks keyed by label; each block starts with its header line
    blocks: BTreeMap<VersionLabel, String>,
}

impl ChangelogDocument {
    /// Split changelog text into preamble and release blocks
    pub fn parse(text: &str) -> Self {
        let mut preamble = String::new();
        let mut unlabelled = String::new();
        let mut blocks: BTreeMap<VersionLabel, String> = BTreeMap::new();
        let mut current: Option<(VersionLabel, String)> = None;

        for line in text.lines() {
            if let Some(label) = parse_version_header(line) {
                if let Some((label, block)) = current.take() {
                    insert_block(&mut blocks, label, block);
                }
                current = Some((label, String::new()));
            }
            let target = match current.as_mut() {
                Some((_, block)) => block,
                None if !unlabelled.is_empty() || line.starts_with("## ") => &mut unlabelled,
                None => &mut preamble,
            };
            target.push_str(line);
            target.push('\n');
        }
        if let Some((label, block)) = current {
            insert_block(&mut blocks, label, block);
        }

        Self {
            preamble: preamble.trim_end().to_string(),
            unlabelled: unlabelled.trim_end().to_string(),
            blocks,
        }
    }

    /// Text before the first release block
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Sections before the first release block that are not releases
    pub fn unlabelled(&self) -> &str {
        &self.unlabelled
    }

    /// Labels in document order
    pub fn labels(&self) -> impl Iterator<Item = &VersionLabel> {
        self.blocks.keys()
    }

    /// Block text for a label, header line included
    pub fn block(&self, label: &VersionLabel) -> Option<&str> {
        self.blocks.get(label).map(String::as_str)
    }

    /// Number of release blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no release blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Whether a block exists for `version`
    pub fn contains(&self, version: &Version) -> bool {
        self.blocks
            .contains_key(&VersionLabel::Version(version.clone()))
    }

    /// Highest documented version
    pub fn latest_version(&self) -> Option<&Version> {
        self.blocks.keys().find_map(VersionLabel::version)
    }

    /// Whether the block for `label` contains `needle`
    pub fn block_mentions(&self, label: &VersionLabel, needle: &str) -> bool {
        self.block(label).is_some_and(|b| b.contains(needle))
    }

    /// Drop the block for `label`, returning its text
    pub fn remove(&mut self, label: &VersionLabel) -> Option<String> {
        self.blocks.remove(label)
    }

    /// Fold `incoming` into this document
    ///
    /// Blocks from `incoming` replace blocks with the same label and the
    /// incoming preamble wins. Everything else is kept as it was, including
    /// unlabelled sections of the old preamble.
    pub fn merge(&mut self, incoming: ChangelogDocument) {
        if !incoming.preamble.is_empty() {
            self.preamble = incoming.preamble;
        }
        if !incoming.unlabelled.is_empty() {
            if !self.unlabelled.is_empty() {
                self.unlabelled.push_str("\n\n");
            }
            self.unlabelled.push_str(&incoming.unlabelled);
        }
        for (label, block) in incoming.blocks {
            if self.blocks.insert(label.clone(), block).is_some() {
                debug!(label = %label, "replaced existing changelog block");
            }
        }
    }
}

fn insert_block(blocks: &mut BTreeMap<VersionLabel, String>, label: VersionLabel, block: String) {
    let block = block.trim_end().to_string();
    match blocks.get_mut(&label) {
        // keep duplicate sections rather than dropping hand-written text
        Some(existing) => {
            existing.push_str("\n\n");
            existing.push_str(&block);
        }
        None => {
            blocks.insert(label, block);
        }
    }
}

impl fmt::Display for ChangelogDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let sections = [&self.preamble, &self.unlabelled]
            .into_iter()
            .filter(|s| !s.is_empty())
            .chain(self.blocks.values());
        for block in sections {
            if !first {
                writeln!(f)?;
            }
            writeln!(f, "{}", block)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING: &str = "# Changelog\n\nOld intro.\n\n## v1.1.0\n\n- hand edited entry\n\n## Notes for 1.0\n\nstill part of 1.0\n\n## [1.0.0] - 2024-01-01\n\n- first\n";

    fn v(s: &str) -> VersionLabel {
        VersionLabel::Version(Version::parse(s).unwrap())
    }

    #[test]
    fn test_parse_version_header_forms() {
        assert_eq!(parse_version_header("## Unreleased"), Some(VersionLabel::Unreleased));
        assert_eq!(parse_version_header("## [unreleased]"), Some(VersionLabel::Unreleased));
        assert_eq!(parse_version_header("## v1.2.3"), Some(v("1.2.3")));
        assert_eq!(parse_version_header("## 1.2.3 - 2024-05-01"), Some(v("1.2.3")));
        assert_eq!(parse_version_header("## [2.0.0-rc.1] (2024-05-01)"), Some(v("2.0.0-rc.1")));
        assert_eq!(
            parse_version_header("## [1.3.0](https://github.com/acme/app/compare/v1.2.0...v1.3.0) (2024-02-01)"),
            Some(v("1.3.0"))
        );
        assert_eq!(
            parse_version_header("## [Unreleased](https://github.com/acme/app/compare/v1.3.0...HEAD)"),
            Some(VersionLabel::Unreleased)
        );
        assert_eq!(parse_version_header("### v1.2.3"), None);
        assert_eq!(parse_version_header("## Notes"), None);
        assert_eq!(parse_version_header("## v1.2"), None);
        assert_eq!(parse_version_header("## v1.2.3.4"), None);
    }

    #[test]
    fn test_parse_document() {
        let doc = ChangelogDocument::parse(EXISTING);
        assert_eq!(doc.preamble(), "# Changelog\n\nOld intro.");
        assert_eq!(doc.len(), 2);
        assert!(doc.block(&v("1.1.0")).unwrap().contains("still part of 1.0"));
        assert_eq!(doc.latest_version(), Some(&Version::new(1, 1, 0)));
        assert!(doc.contains(&Version::new(1, 0, 0)));
        assert!(!doc.contains(&Version::new(2, 0, 0)));
    }

    #[test]
    fn test_labels_order() {
        let doc = ChangelogDocument::parse("## v1.0.0\n\n## v1.10.0\n\n## Unreleased\n\n## v1.9.0\n");
        let labels: Vec<String> = doc.labels().map(|l| l.to_string()).collect();
        assert_eq!(labels, vec!["Unreleased", "v1.10.0", "v1.9.0", "v1.0.0"]);
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut doc = ChangelogDocument::parse(EXISTING);
        let incoming =
            ChangelogDocument::parse("# Changelog\n\nNew intro.\n\n## v1.2.0\n\n- new\n\n## v1.1.0\n\n- regenerated\n");
        doc.merge(incoming);

        let text = doc.to_string();
        assert!(text.starts_with("# Changelog\n\nNew intro.\n\n## v1.2.0"));
        assert!(text.contains("- regenerated"));
        assert!(!text.contains("hand edited"));
        assert!(text.contains("## [1.0.0] - 2024-01-01\n\n- first\n"));
        assert!(text.find("v1.2.0").unwrap() < text.find("v1.1.0").unwrap());
    }

    #[test]
    fn test_render_is_stable_under_reparse() {
        let doc = ChangelogDocument::parse(EXISTING);
        let once = doc.to_string();
        let twice = ChangelogDocument::parse(&once).to_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_duplicate_blocks_are_kept() {
        let doc = ChangelogDocument::parse("## v1.0.0\n\n- a\n\n## v1.0.0\n\n- b\n");
        let block = doc.block(&v("1.0.0")).unwrap();
        assert!(block.contains("- a"));
        assert!(block.contains("- b"));
    }

    #[test]
    fn test_remove_block() {
        let mut doc = ChangelogDocument::parse("## Unreleased\n\n- wip\n\n## v1.0.0\n\n- first\n");
        let removed = doc.remove(&VersionLabel::Unreleased).unwrap();
        assert!(removed.contains("- wip"));
        assert_eq!(doc.to_string(), "## v1.0.0\n\n- first\n");
        assert!(doc.remove(&VersionLabel::Unreleased).is_none());
    }

    #[test]
    fn test_linked_headers_survive_merge() {
        let existing = "# Changelog\n\n## [1.0.0](https://github.com/acme/app/compare/v0.9.0...v1.0.0) (2024-01-01)\n\n- old release notes\n\n## [0.9.0](https://github.com/acme/app/compare/v0.8.0...v0.9.0) (2023-12-01)\n\n- older notes\n";
        let mut doc = ChangelogDocument::parse(existing);
        let labels: Vec<String> = doc.labels().map(|l| l.to_string()).collect();
        assert_eq!(labels, vec!["v1.0.0", "v0.9.0"]);
        assert_eq!(doc.preamble(), "# Changelog");

        doc.merge(ChangelogDocument::parse("# Changelog\n\nNew.\n\n## v1.1.0\n\n- new\n"));
        let text = doc.to_string();
        assert!(text.starts_with("# Changelog\n\nNew.\n\n## v1.1.0\n\n- new\n"));
        assert!(text.contains("- old release notes"));
        assert!(text.contains("- older notes"));
        assert!(text.contains("compare/v0.9.0...v1.0.0) (2024-01-01)"));
    }

    #[test]
    fn test_unlabelled_sections_are_kept() {
        let existing = "# Changelog\n\n## Migration guide\n\nRead this first.\n\n## v1.0.0\n\n- first\n";
        let mut doc = ChangelogDocument::parse(existing);
        assert_eq!(doc.preamble(), "# Changelog");
        assert_eq!(doc.unlabelled(), "## Migration guide\n\nRead this first.");

        doc.merge(ChangelogDocument::parse("# Releases\n\n## v1.1.0\n\n- new\n"));
        assert_eq!(
            doc.to_string(),
            "# Releases\n\n## Migration guide\n\nRead this first.\n\n## v1.1.0\n\n- new\n\n## v1.0.0\n\n- first\n"
        );
        assert_eq!(ChangelogDocument::parse(&doc.to_string()), doc);
    }

    #[test]
    fn test_empty_document() {
        let doc = ChangelogDocument::parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.latest_version(), None);
        assert_eq!(doc.to_string(), "");
    }
}
