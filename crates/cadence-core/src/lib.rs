//! Cadence Core - Core library for commit-driven release versioning
//!
//! This crate provides the foundational types, error handling, configuration,
//! package manifest access and file workflow helpers shared by the Cadence
//! crates.

pub mod config;
pub mod error;
pub mod manifest;
pub mod packages;
pub mod types;
pub mod workflow;

pub use error::{CadenceError, Result, SessionError};
pub use manifest::ManifestKind;
pub use packages::discover_packages;
pub use types::PackageInfo;
