//! Logging Infrastructure
//!
//! Structured logging setup. Console output by default, a daily rolling file
//! when a log directory is configured and exists.

use std::path::Path;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists()
            && let Some(dir_str) = log_path.to_str()
        {
            let file_appender = tracing_appender::rolling::daily(dir_str, "menu-report");
            let _ = subscriber.with_writer(file_appender).try_init();
            return;
        }
        eprintln!("Log directory {} does not exist, logging to stderr", dir);
    }

    // stdout carries the JSON report
    let _ = subscriber.with_writer(std::io::stderr).try_init();
}
