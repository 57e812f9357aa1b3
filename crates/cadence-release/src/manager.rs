//! Release sessions
//!
//! One session per package: pick the release range, resolve PRs, partition,
//! decide the version, render and merge the changelog, then persist. The
//! changelog is written at most once per session.

use rayon::ThreadPool;
use semver::Version;
use tracing::{debug, info, instrument, warn};

use cadence_changelog::{
    partition, worker_pool, CategoryRules, ChangelogDocument, ChangelogFormatter,
    ConventionalParser, MarkdownFormatter, ParserConfig, PrResolver, RenderOptions,
    ResolverLimits, VersionLabel,
};
use cadence_core::error::{CadenceError, Result, SessionError, VersionError};
use cadence_core::manifest::{read_version, write_version};
use cadence_core::types::PackageInfo;
use cadence_core::workflow::{format_tag, read_changelog, write_changelog};
use cadence_git::{RevisionRange, TagInfo};
use cadence_strategies::{VersionDecision, VersionDeterminer};

use crate::context::RunContext;
use crate::snapshot::SessionSnapshot;

/// Options for a run
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Compute everything but write nothing
    pub dry_run: bool,
    /// Render the range under `## Unreleased` without bumping
    pub unreleased: bool,
    /// Tag the release when the version is bumped
    pub tag: bool,
    /// Only run the session for this package
    pub package: Option<String>,
}

impl SessionOptions {
    /// Create options for a dry run
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }

    /// Restrict the run to one package
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }
}

/// Result of one package session
#[derive(Debug)]
pub enum PackageOutcome {
    Completed(SessionSnapshot),
    Failed(SessionError),
}

impl PackageOutcome {
    /// Package the session ran for
    pub fn package(&self) -> &str {
        match self {
            Self::Completed(snapshot) => &snapshot.package,
            Self::Failed(err) => &err.package,
        }
    }

    /// Whether the session completed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Snapshot of a completed session
    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        match self {
            Self::Completed(snapshot) => Some(snapshot),
            Self::Failed(_) => None,
        }
    }
}

/// Runs release sessions over the packages of a [`RunContext`]
pub struct ReleaseManager<'a> {
    ctx: &'a RunContext,
    options: SessionOptions,
    parser: ConventionalParser,
    rules: CategoryRules,
    formatter: MarkdownFormatter,
    determiner: VersionDeterminer,
    pool: ThreadPool,
}

impl<'a> ReleaseManager<'a> {
    /// Create a manager; builds the worker pool used for PR resolution
    pub fn new(ctx: &'a RunContext, options: SessionOptions) -> Result<Self> {
        let changelog = &ctx.config.changelog;

        let mut render = RenderOptions::from_changelog(changelog);
        if let Some(url) = &ctx.repository_url {
            render = render.with_repository_url(url.as_str());
        }

        let threads = ctx.config.engine.worker_threads();
        let pool = worker_pool(threads)
            .map_err(|e| CadenceError::other(format!("failed to start worker pool: {}", e)))?;
        debug!(threads, "worker pool ready");

        Ok(Self {
            ctx,
            options,
            parser: ConventionalParser::with_config(ParserConfig::from_changelog(changelog)),
            rules: CategoryRules::from_changelog(changelog),
            formatter: MarkdownFormatter::new(render),
            determiner: VersionDeterminer::default(),
            pool,
        })
    }

    /// Run a session for every selected package
    ///
    /// A failing package is reported in its outcome and does not stop the
    /// others.
    #[instrument(skip(self), fields(packages = self.ctx.packages.len(), dry_run = self.options.dry_run))]
    pub fn run_all(&self) -> Vec<PackageOutcome> {
        let selected: Vec<&PackageInfo> = match &self.options.package {
            Some(name) => match self.ctx.package(name) {
                Some(package) => vec![package],
                None => {
                    let err = SessionError::new(
                        name.as_str(),
                        CadenceError::other(format!("no package named '{}'", name)),
                    );
                    return vec![PackageOutcome::Failed(err)];
                }
            },
            None => self.ctx.packages.iter().collect(),
        };

        let outcomes: Vec<PackageOutcome> = selected
            .into_iter()
            .map(|package| match self.run_package(package) {
                Ok(snapshot) => PackageOutcome::Completed(snapshot),
                Err(err) => {
                    warn!(package = %package.name, error = %err, "package session failed");
                    PackageOutcome::Failed(err)
                }
            })
            .collect();

        info!(
            completed = outcomes.iter().filter(|o| o.is_success()).count(),
            failed = outcomes.iter().filter(|o| !o.is_success()).count(),
            "run finished"
        );
        outcomes
    }

    /// Run the session for one package
    #[instrument(skip(self, package), fields(package = %package.name))]
    pub fn run_package(
        &self,
        package: &PackageInfo,
    ) -> std::result::Result<SessionSnapshot, SessionError> {
        self.session(package)
            .map_err(|e| SessionError::new(package.name.as_str(), e))
    }

    fn session(&self, package: &PackageInfo) -> Result<SessionSnapshot> {
        let manifest_path = self.ctx.manifest_path(package);
        let changelog_path = self.ctx.changelog_path(package);

        let current = read_version(package.kind, &manifest_path)?;
        let range = self.select_range(package, &current)?;
        let hashes = self.ctx.source.commits_in_range(&range)?;
        info!(range = %range, commits = hashes.len(), current = %current, "walking release range");

        let resolver = PrResolver::new(
            self.ctx.source.as_ref(),
            &self.parser,
            &self.rules,
            ResolverLimits::from(&self.ctx.config.engine),
            &self.pool,
        )
        .with_path(package.path_filter());
        let commits = resolver.resolve_range(&hashes);
        let categorized = partition(&commits, &self.rules);
        let buckets = categorized.bucket_counts();
        debug!(buckets = ?buckets, "partitioned range");

        let mut document = ChangelogDocument::parse(&read_changelog(&changelog_path)?);
        let mut decision = self.determiner.determine(&current, &commits, &document)?;
        if self.options.unreleased {
            decision = decision.withheld("unreleased");
        }
        info!(
            current = %decision.current_version,
            target = %decision.target_version,
            bump = %decision.bump_type,
            reason = %decision.reason,
            "version decided"
        );

        let mut snapshot = SessionSnapshot {
            package: package.name.clone(),
            range: range.to_string(),
            commit_count: commits.len(),
            buckets,
            decision: decision.clone(),
            release: None,
            fragment: None,
            merged: None,
            changelog_path: changelog_path.clone(),
            written: false,
            manifest_updated: false,
            tag: None,
        };

        let Some(label) = self.release_label(&decision)? else {
            info!(reason = %decision.reason, "nothing to release");
            return Ok(snapshot);
        };

        let date = match label {
            VersionLabel::Unreleased => None,
            VersionLabel::Version(_) => self.ctx.release_date,
        };
        let fragment = self.formatter.render(&label, date, &categorized);
        if label != VersionLabel::Unreleased
            && document.remove(&VersionLabel::Unreleased).is_some()
        {
            debug!("released range replaces the unreleased block");
        }
        document.merge(ChangelogDocument::parse(&fragment));
        let merged = document.to_string();

        snapshot.release = Some(label.header());
        snapshot.fragment = Some(fragment);

        if self.options.dry_run {
            info!(path = %changelog_path.display(), "dry run, nothing written");
            snapshot.merged = Some(merged);
            return Ok(snapshot);
        }

        write_changelog(&changelog_path, &merged)?;
        snapshot.written = true;

        if decision.should_bump && !self.options.unreleased {
            write_version(package.kind, &manifest_path, &decision.target_version)?;
            snapshot.manifest_updated = true;

            if self.options.tag {
                snapshot.tag = self.create_tag(package, &decision)?;
            }
        }

        Ok(snapshot)
    }

    /// Tag for the current version if present, else the newest release tag
    /// of this package, else the whole history
    fn select_range(&self, package: &PackageInfo, current: &str) -> Result<RevisionRange> {
        let config = &self.ctx.config;
        let source = self.ctx.source.as_ref();

        let version = current.trim();
        let version = version.strip_prefix('v').unwrap_or(version);
        let current_tag = format_tag(config, version, Some(&package.name));

        let from = match source.find_tag(&current_tag)? {
            Some(tag) => Some(tag.name),
            None => {
                let belongs = |tag: &TagInfo| {
                    tag.version
                        .as_deref()
                        .is_some_and(|v| format_tag(config, v, Some(&package.name)) == tag.name)
                };
                let latest = source.latest_version_tag(&belongs)?;
                if latest.is_none() {
                    debug!(tag = %current_tag, "no release tag found, using whole history");
                }
                latest.map(|t| t.name)
            }
        };

        let range = match from {
            Some(tag) => RevisionRange::since(tag),
            None => RevisionRange::head(),
        };
        Ok(range.with_path(package.path_filter()))
    }

    fn release_label(&self, decision: &VersionDecision) -> Result<Option<VersionLabel>> {
        if self.options.unreleased {
            return Ok(Some(VersionLabel::Unreleased));
        }
        if !decision.should_bump {
            return Ok(None);
        }
        let version = Version::parse(&decision.target_version).map_err(VersionError::from)?;
        Ok(Some(VersionLabel::Version(version)))
    }

    fn create_tag(
        &self,
        package: &PackageInfo,
        decision: &VersionDecision,
    ) -> Result<Option<String>> {
        let Some(repo) = &self.ctx.tagger else {
            warn!(package = %package.name, "history is not a git repository, skipping tag");
            return Ok(None);
        };

        let name = format_tag(&self.ctx.config, &decision.target_version, Some(&package.name));
        let tag = repo.create_tag(&name, Some(&format!("Release {}", name)))?;
        info!(tag = %tag.name, commit = %tag.commit_hash, "release tagged");
        Ok(Some(tag.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use cadence_core::config::Config;
    use cadence_core::manifest::ManifestKind;
    use cadence_git::MemoryHistory;
    use cadence_strategies::BumpType;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, name: &str, version: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(
            dir.join("package.json"),
            format!(r#"{{"name": "{}", "version": "{}"}}"#, name, version),
        )
        .unwrap();
    }

    fn app_context(temp: &TempDir, history: MemoryHistory) -> RunContext {
        let mut config = Config::default();
        config.changelog.repository_url = Some("https://github.com/acme/app".to_string());
        config.engine.parallelism = 2;
        RunContext::new(config, temp.path(), Arc::new(history)).with_packages(vec![
            PackageInfo::new("app", ".", ManifestKind::Npm, "package.json"),
        ])
    }

    fn linear_history() -> MemoryHistory {
        let mut history = MemoryHistory::new();
        history
            .add("a000001", "feat(ui): add search", &[])
            .add("b000002", "fix: handle empty query", &["a000001"])
            .add("c000003", "docs: describe search", &["b000002"]);
        history
    }

    fn run(ctx: &RunContext, options: SessionOptions) -> SessionSnapshot {
        let outcomes = ReleaseManager::new(ctx, options).unwrap().run_all();
        assert_eq!(outcomes.len(), 1);
        match outcomes.into_iter().next().unwrap() {
            PackageOutcome::Completed(snapshot) => snapshot,
            PackageOutcome::Failed(err) => panic!("session failed: {}", err),
        }
    }

    #[test]
    fn test_release_writes_changelog_and_manifest() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let ctx = app_context(&temp, linear_history());

        let snapshot = run(&ctx, SessionOptions::default());
        assert_eq!(snapshot.decision.target_version, "1.3.0");
        assert_eq!(snapshot.commit_count, 3);
        assert_eq!(snapshot.range, "HEAD");
        assert_eq!(snapshot.buckets.values().sum::<usize>(), 3);
        assert!(snapshot.written);
        assert!(snapshot.manifest_updated);
        assert!(snapshot.tag.is_none());

        let changelog = std::fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
        assert!(changelog.starts_with("# Changelog\n"));
        assert!(changelog.contains("## v1.3.0\n"));
        assert!(changelog.contains("### Features"));
        assert!(changelog.contains("### Bug Fixes"));
        assert!(changelog.contains("### Documentation"));
        for hash in ["a000001", "b000002", "c000003"] {
            assert!(changelog.contains(hash));
        }
        assert_eq!(
            read_version(ManifestKind::Npm, &temp.path().join("package.json")).unwrap(),
            "1.3.0"
        );
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let ctx = app_context(&temp, linear_history());

        run(&ctx, SessionOptions::default());
        let path = temp.path().join("CHANGELOG.md");
        let first = std::fs::read_to_string(&path).unwrap();

        let again = run(&ctx, SessionOptions::default());
        assert!(!again.decision.should_bump);
        assert!(again.decision.reason.contains("already exists in changelog"));
        assert!(!again.changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let ctx = app_context(&temp, linear_history()).with_release_date(date);

        let snapshot = run(&ctx, SessionOptions::dry_run());
        assert!(!snapshot.written);
        assert!(!snapshot.manifest_updated);
        assert!(snapshot.merged.unwrap().contains("## v1.3.0 - 2024-05-01"));
        assert_eq!(snapshot.release.as_deref(), Some("## v1.3.0"));
        assert!(!temp.path().join("CHANGELOG.md").exists());
        assert_eq!(
            read_version(ManifestKind::Npm, &temp.path().join("package.json")).unwrap(),
            "1.2.3"
        );
    }

    #[test]
    fn test_unreleased_then_release() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let ctx = app_context(&temp, linear_history());
        let path = temp.path().join("CHANGELOG.md");

        let options = SessionOptions {
            unreleased: true,
            ..Default::default()
        };
        let snapshot = run(&ctx, options);
        assert!(snapshot.written);
        assert!(!snapshot.manifest_updated);
        assert!(!snapshot.decision.should_bump);
        assert_eq!(snapshot.decision.bump_type, BumpType::None);
        assert_eq!(snapshot.decision.target_version, "1.2.3");
        assert_eq!(snapshot.decision.reason, "unreleased");
        assert!(std::fs::read_to_string(&path).unwrap().contains("## Unreleased"));
        assert_eq!(
            read_version(ManifestKind::Npm, &temp.path().join("package.json")).unwrap(),
            "1.2.3"
        );

        run(&ctx, SessionOptions::default());
        let changelog = std::fs::read_to_string(&path).unwrap();
        assert!(changelog.contains("## v1.3.0"));
        assert!(!changelog.contains("## Unreleased"));
    }

    #[test]
    fn test_range_starts_at_current_version_tag() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let mut history = linear_history();
        history.tag("v1.2.3", "a000001");
        let ctx = app_context(&temp, history);

        let snapshot = run(&ctx, SessionOptions::dry_run());
        assert_eq!(snapshot.range, "v1.2.3..HEAD");
        assert_eq!(snapshot.commit_count, 2);
        assert_eq!(snapshot.decision.target_version, "1.2.4");
    }

    #[test]
    fn test_range_falls_back_to_latest_release_tag() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.5");
        let mut history = linear_history();
        history
            .tag("v1.0.0", "a000001")
            .tag("v1.2.0", "b000002")
            .tag("ui@9.0.0", "c000003");
        let ctx = app_context(&temp, history);

        let snapshot = run(&ctx, SessionOptions::dry_run());
        assert_eq!(snapshot.range, "v1.2.0..HEAD");
        assert_eq!(snapshot.commit_count, 1);
        assert_eq!(snapshot.decision.target_version, "1.2.6");
    }

    #[test]
    fn test_pull_request_range() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "0.1.0");
        let mut history = MemoryHistory::new();
        history
            .add("r000001", "chore: init", &[])
            .add("m000002", "fix(api): timeout", &["r000001"])
            .add("f000003", "feat(ui): button", &["r000001"])
            .add("t000004", "test(ui): button", &["f000003"])
            .add(
                "x000005",
                "Merge pull request #7 from acme/button\n\nfeat(ui): add button",
                &["m000002", "t000004"],
            );
        let ctx = app_context(&temp, history);

        let snapshot = run(&ctx, SessionOptions::dry_run());
        assert_eq!(snapshot.commit_count, 5);
        assert_eq!(snapshot.buckets.get("pr:features"), Some(&3));
        assert_eq!(snapshot.buckets.get("bugfixes"), Some(&1));
        assert_eq!(snapshot.buckets.values().sum::<usize>(), 5);
        assert_eq!(snapshot.decision.target_version, "0.2.0");

        let fragment = snapshot.fragment.unwrap();
        assert!(fragment.contains("### Pull Requests: Features"));
        assert!(fragment.contains("[#7](https://github.com/acme/app/pull/7)"));
        assert!(!fragment.contains("\n### Features"));
    }

    #[test]
    fn test_failed_package_does_not_stop_others() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let ctx = app_context(&temp, linear_history()).with_packages(vec![
            PackageInfo::new(
                "ghost",
                "packages/ghost",
                ManifestKind::Npm,
                "packages/ghost/package.json",
            ),
            PackageInfo::new("app", ".", ManifestKind::Npm, "package.json"),
        ]);

        let outcomes = ReleaseManager::new(&ctx, SessionOptions::dry_run())
            .unwrap()
            .run_all();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].package(), "ghost");
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        assert_eq!(
            outcomes[1].snapshot().unwrap().decision.target_version,
            "1.3.0"
        );
    }

    #[test]
    fn test_manifest_catches_up_to_changelog() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.0.0");
        std::fs::write(
            temp.path().join("CHANGELOG.md"),
            "# Changelog\n\n## v2.1.0\n\n- shipped from another branch\n\n## v1.0.0\n\n- first\n",
        )
        .unwrap();
        let mut history = MemoryHistory::new();
        history.add("a000001", "fix: handle empty query", &[]);
        let ctx = app_context(&temp, history);

        let snapshot = run(&ctx, SessionOptions::default());
        assert_eq!(snapshot.decision.bump_type, BumpType::Sync);
        assert_eq!(snapshot.decision.current_version, "1.0.0");
        assert_eq!(snapshot.decision.target_version, "2.1.0");
        assert!(snapshot.manifest_updated);
        assert_eq!(
            read_version(ManifestKind::Npm, &temp.path().join("package.json")).unwrap(),
            "2.1.0"
        );

        let changelog = std::fs::read_to_string(temp.path().join("CHANGELOG.md")).unwrap();
        assert_eq!(changelog.matches("## v2.1.0").count(), 1);
        assert!(changelog.contains("a000001"));
        assert!(changelog.contains("## v1.0.0\n\n- first"));
    }

    #[test]
    fn test_changelog_write_failure_names_package() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        // a plain file where the changelog directory should be
        std::fs::write(temp.path().join("docs"), "not a directory").unwrap();

        let mut config = Config::default();
        config.changelog.file = "docs/CHANGELOG.md".into();
        let ctx = RunContext::new(config, temp.path(), Arc::new(linear_history())).with_packages(
            vec![PackageInfo::new("app", ".", ManifestKind::Npm, "package.json")],
        );

        let outcomes = ReleaseManager::new(&ctx, SessionOptions::default())
            .unwrap()
            .run_all();
        assert_eq!(outcomes.len(), 1);
        let PackageOutcome::Failed(err) = &outcomes[0] else {
            panic!("expected the session to fail");
        };
        assert_eq!(err.package, "app");
        assert!(matches!(
            err.source,
            CadenceError::Changelog(cadence_core::error::ChangelogError::WriteFailed { .. })
        ));
        assert!(err.to_string().starts_with("package 'app':"));
        assert_eq!(
            read_version(ManifestKind::Npm, &temp.path().join("package.json")).unwrap(),
            "1.2.3"
        );
    }

    #[test]
    fn test_unknown_package_filter() {
        let temp = TempDir::new().unwrap();
        let ctx = app_context(&temp, linear_history());

        let outcomes = ReleaseManager::new(&ctx, SessionOptions::default().with_package("nope"))
            .unwrap()
            .run_all();
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            PackageOutcome::Failed(err) => assert!(err.to_string().contains("no package named 'nope'")),
            PackageOutcome::Completed(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_nested_package_uses_path_filter() {
        let temp = TempDir::new().unwrap();
        write_manifest(&temp.path().join("packages/ui"), "ui", "0.1.0");
        let mut history = MemoryHistory::new();
        history
            .add_touching("a000001", "feat(ui): button", &[], &["packages/ui/button.ts"])
            .add_touching("b000002", "fix(api): retry", &["a000001"], &["packages/api/retry.ts"]);

        let mut config = Config::default();
        config.versioning.independent = true;
        let ctx = RunContext::new(config, temp.path(), Arc::new(history)).with_packages(vec![
            PackageInfo::new(
                "ui",
                "packages/ui",
                ManifestKind::Npm,
                "packages/ui/package.json",
            ),
        ]);

        let snapshot = run(&ctx, SessionOptions::default());
        assert_eq!(snapshot.range, "HEAD -- packages/ui");
        assert_eq!(snapshot.commit_count, 1);
        assert_eq!(snapshot.decision.target_version, "0.2.0");
        assert!(temp.path().join("packages/ui/CHANGELOG.md").exists());
        assert!(!temp.path().join("CHANGELOG.md").exists());
    }

    #[test]
    fn test_tag_without_git_repository_is_skipped() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "app", "1.2.3");
        let ctx = app_context(&temp, linear_history());

        let options = SessionOptions {
            tag: true,
            ..Default::default()
        };
        let snapshot = run(&ctx, options);
        assert!(snapshot.manifest_updated);
        assert!(snapshot.tag.is_none());
    }

    #[test]
    fn test_release_tags_git_repository() {
        let temp = TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Dev").unwrap();
            config.set_str("user.email", "dev@example.com").unwrap();
        }
        write_manifest(temp.path(), "app", "0.1.0");
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("package.json")).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = repo.signature().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "feat: first release", &tree, &[])
            .unwrap();

        let ctx = RunContext::discover(temp.path(), Config::default()).unwrap();
        assert_eq!(ctx.packages.len(), 1);
        assert!(ctx.repository_url.is_none());

        let options = SessionOptions {
            tag: true,
            ..Default::default()
        };
        let snapshot = run(&ctx, options);
        assert_eq!(snapshot.decision.target_version, "0.2.0");
        assert_eq!(snapshot.tag.as_deref(), Some("v0.2.0"));
        assert!(repo.find_reference("refs/tags/v0.2.0").is_ok());
    }
}
