use folder_notify::config::LoggingConfig;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILE_NAME: &str = "folder-notify.log";

/// Log to stdout and to the configured file. Keep the returned guard alive
/// until exit so the file writer flushes.
pub fn init_logger(config: &LoggingConfig) -> impl Drop {
    let filter_layer =
        EnvFilter::try_from_env("TRACING_LEVEL").unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_path = Path::new(&config.file);
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let log_file_name = log_path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_NAME));

    let file_appender = tracing_appender::rolling::never(log_dir, log_file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .compact()
                .with_target(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .with(filter_layer)
        .init();

    debug!("Logging to stdout and {}", log_path.display());

    guard
}
