//! Cadence - Commit-driven versioning and changelog CLI

mod cli;
mod exit_codes;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let guard = init_tracing();

    let code = Cli::parse().execute()?;
    if code != exit_codes::SUCCESS {
        // process::exit skips destructors
        drop(guard);
        std::process::exit(code);
    }
    Ok(())
}

/// Human readable events go to stderr, filtered by `RUST_LOG` (default
/// `warn`). When a home directory is available, debug-level JSON is also
/// appended to a daily file under `~/.cadence/logs/`.
fn init_tracing() -> Option<WorkerGuard> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")));

    let (file, guard) = match log_directory() {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "cadence.log"));
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

fn log_directory() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".cadence").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
