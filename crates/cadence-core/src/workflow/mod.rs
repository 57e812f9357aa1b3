//! File and tag workflow helpers shared by release sessions

mod changelog;
mod version;

pub use changelog::*;
pub use version::*;
