//! Cadence Release - Per-package versioning sessions
//!
//! A session walks one package's release range, resolves pull requests,
//! decides the next version and merges the rendered release into the
//! package changelog. [`ReleaseManager`] runs one session per package and
//! never lets a failing package abort the rest.

mod context;
mod manager;
mod snapshot;

pub use context::RunContext;
pub use manager::{PackageOutcome, ReleaseManager, SessionOptions};
pub use snapshot::SessionSnapshot;
