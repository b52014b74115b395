//! Tracing setup for the dashboard client.
//!
//! Logs go to a daily-rolling file under `~/.gesturedash/logs`, falling back
//! to stderr when no home directory resolves. `GESTUREDASH_DEBUG_LOG=1` forces
//! debug level; otherwise `RUST_LOG` applies with an `info` default.

use std::env;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEBUG_ENV: &str = "GESTUREDASH_DEBUG_LOG";
const LOG_FILE_PREFIX: &str = "client.log";

/// Initializes the global subscriber. Keep the returned guard alive for the
/// lifetime of the session so buffered log lines are flushed on teardown.
/// Subsequent calls are no-ops.
pub fn init() -> Option<WorkerGuard> {
    let filter = env_filter();

    match log_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Some(guard)
        }
        None => {
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
            None
        }
    }
}

fn env_filter() -> EnvFilter {
    let debug_enabled = env::var(DEBUG_ENV)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gesturedash").join("logs"))
}
