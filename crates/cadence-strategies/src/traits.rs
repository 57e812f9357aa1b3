//! Version strategy traits

use cadence_core::error::Result;
use semver::Version;

use crate::types::BumpType;

/// How versions are read and advanced
pub trait VersionStrategy: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Parse a manifest version
    fn parse(&self, version: &str) -> Result<Version>;

    /// Apply `bump_type` to `current`
    ///
    /// `Sync` and `None` leave the version untouched; a sync target comes
    /// from the changelog, not from arithmetic.
    fn bump(&self, current: &Version, bump_type: BumpType) -> Result<Version>;

    /// Bump implied by a release range; any commit at all warrants a patch
    fn determine_bump_type(&self, is_breaking: bool, is_feature: bool) -> BumpType {
        if is_breaking {
            BumpType::Major
        } else if is_feature {
            BumpType::Minor
        } else {
            BumpType::Patch
        }
    }

    /// Whether `version` parses under this strategy
    fn is_valid(&self, version: &str) -> bool {
        self.parse(version).is_ok()
    }
}
