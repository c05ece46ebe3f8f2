//! Structured logging with tracing
//!
//! Sets up:
//! - Console logging to stderr (text or JSON)
//! - File logging with daily rotation (optional, always JSON)

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{LogFormat, LoggingConfig};

const LOG_FILE_PREFIX: &str = "focusflow.log";

/// Initialize the global tracing subscriber.
///
/// Returns the file writer guard when file logging is enabled. Dropping the
/// guard stops file logging, so callers keep it alive for the whole process.
pub fn init_tracing(config: &LoggingConfig) -> std::io::Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let console_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if config.enable_file_logging {
        config.ensure_log_dir()?;
        let (writer, guard) = tracing_appender::non_blocking(daily(&config.log_dir, LOG_FILE_PREFIX));
        let file_layer = fmt::layer().with_writer(writer).with_ansi(false).json();
        // try_init: a subscriber may already be installed (tests, embedding)
        let _ = registry.with(file_layer).try_init();
        return Ok(Some(guard));
    }

    let _ = registry.try_init();
    Ok(None)
}
