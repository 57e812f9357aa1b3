//! CLI commands

mod changelog;
mod init;
mod version;

pub use changelog::ChangelogCommand;
pub use init::InitCommand;
pub use version::VersionCommand;
