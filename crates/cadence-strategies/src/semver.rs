//! SemVer version strategy

use cadence_core::error::{Result, VersionError};
use semver::{BuildMetadata, Prerelease, Version};

use crate::traits::VersionStrategy;
use crate::types::BumpType;

/// Semantic Versioning strategy
///
/// Follows the SemVer 2.0.0 specification: https://semver.org/
#[derive(Debug, Clone, Copy, Default)]
pub struct SemVerStrategy;

impl SemVerStrategy {
    /// Create a new SemVer strategy
    pub fn new() -> Self {
        Self
    }
}

impl VersionStrategy for SemVerStrategy {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, version: &str) -> Result<Version> {
        let trimmed = version.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parsed = Version::parse(trimmed)
            .map_err(|e| VersionError::ParseFailed(version.to_string(), e.to_string()))?;
        Ok(parsed)
    }

    fn bump(&self, current: &Version, bump_type: BumpType) -> Result<Version> {
        let overflow = |component| VersionError::Overflow(current.to_string(), component);
        let mut result = current.clone();

        match bump_type {
            BumpType::Major => {
                result.major = result.major.checked_add(1).ok_or_else(|| overflow("major"))?;
                result.minor = 0;
                result.patch = 0;
            }
            BumpType::Minor => {
                result.minor = result.minor.checked_add(1).ok_or_else(|| overflow("minor"))?;
                result.patch = 0;
            }
            BumpType::Patch => {
                result.patch = result.patch.checked_add(1).ok_or_else(|| overflow("patch"))?;
            }
            BumpType::Sync | BumpType::None => return Ok(result),
        }

        result.pre = Prerelease::EMPTY;
        result.build = BuildMetadata::EMPTY;
        Ok(result)
    }
}
