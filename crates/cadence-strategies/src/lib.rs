//! Cadence Strategies - Version bumping and release decisions
//!
//! This crate holds the semantic-version arithmetic and the determiner that
//! reconciles the current package version, the existing changelog and the
//! commits in range into a single [`VersionDecision`].

pub mod determiner;
mod semver;
mod traits;
pub mod types;

pub use determiner::{VersionDecision, VersionDeterminer};
pub use semver::SemVerStrategy;
pub use traits::VersionStrategy;
pub use types::BumpType;
