//! Logging Infrastructure
//!
//! Structured logging via `tracing`. Initialisation is idempotent: the first
//! call installs the global subscriber, later calls are ignored.

use std::path::Path;

use crate::core::Config;

/// Initialize the logger with defaults (info, stdout)
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger from configuration
pub fn init_from_config(config: &Config) {
    init_logger_with_file(Some(config.log_level.as_str()), config.log_dir.as_deref());
}

/// Initialize the logger with optional daily-rolling file output
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> bool {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(log_path, "standing-engine");
            return subscriber.with_writer(file_appender).try_init().is_ok();
        }
        tracing::warn!(log_dir = %dir, "Log directory does not exist, logging to stdout");
    }

    subscriber.try_init().is_ok()
}
