//! Exit codes for the CLI

use cadence_core::error::{CadenceError, SessionError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Exit code for a failed package session
pub fn for_session(err: &SessionError) -> i32 {
    match &err.source {
        CadenceError::Config(_) => CONFIG_ERROR,
        CadenceError::Git(_) => GIT_ERROR,
        CadenceError::Version(_) => VERSION_ERROR,
        _ => ERROR,
    }
}
