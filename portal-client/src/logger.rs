//! Logging setup
//!
//! `RUST_LOG` takes precedence over the level passed in. Calling either
//! function twice is harmless; the second call is ignored.

use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_level(None);
}

/// Initialize the logger with an optional default level
pub fn init_logger_with_level(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();

    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
