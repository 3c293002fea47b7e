//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - File-based output (stdout carries the JSON response envelopes)
//! - Daily log rotation
//! - Environment-based log level configuration

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "mavenlink_communicator=info,warn";

/// Log filter used when the debug flag is on and RUST_LOG is not set.
const DEBUG_LOG_FILTER: &str = "mavenlink_communicator=debug,info";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender in the user's local
/// data directory. `RUST_LOG` overrides the level; otherwise the debug flag
/// selects between the default and the verbose filter.
///
/// # Log Directory
///
/// - Linux: `~/.local/share/mavenlink-communicator/logs/`
/// - macOS: `~/Library/Application Support/mavenlink-communicator/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\mavenlink-communicator\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// the tracing subscriber cannot be set.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &log_dir, "mavenlink-communicator.log");

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    let debug_flag = debug;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), debug = debug_flag, "Communicator starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn default_filter(debug: bool) -> &'static str {
    if debug {
        DEBUG_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("mavenlink-communicator").join("logs"))
}

/// Log process shutdown.
pub fn shutdown() {
    tracing::info!("Communicator shutting down");
}
