//! Cadence Git - Git history access for release versioning
//!
//! This crate provides the revision-range queries the changelog engine
//! consumes, backed either by a git2 repository or by an in-memory commit
//! graph, plus tag and remote lookups used to pick ranges and build links.

mod commits;
mod history;
pub mod memory;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use history::{CommitSource, SharedRepo};
pub use memory::MemoryHistory;
pub use remote::web_url_from_remote;
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, RevisionRange, TagInfo};
