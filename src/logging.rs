use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::DEFAULT_LOG_DIRECTIVE;

/// Initializes console logging and, when enabled, a daily-rolling JSON log
/// file. Keep the returned guard alive until exit so buffered lines are
/// flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    // Console output goes to stderr; stdout is reserved for command output
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = if config.json_file && fs::create_dir_all(&config.dir).is_ok() {
        let file_appender = tracing_appender::rolling::daily(&config.dir, &config.file_prefix);
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer().json().with_writer(non_blocking_writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    guard
}
