//! Version strategy types

use serde::{Deserialize, Serialize};

/// How a release moves the package version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    /// Breaking change in range
    Major,
    /// New feature in range
    Minor,
    /// Anything else
    Patch,
    /// Catch up to a newer version already documented in the changelog
    Sync,
    /// Leave the version alone
    None,
}

impl BumpType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::Sync => "sync",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
