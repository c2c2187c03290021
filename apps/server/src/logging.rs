//! Logging initialization for carelens binaries
//!
//! Sets up tracing-subscriber from `LoggingConfig`: env-filter (honouring
//! `RUST_LOG`), JSON or human-readable console output, and optional
//! rotating file output via tracing-appender.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keeps the non-blocking file writer alive for the program's lifetime.
/// Dropping it flushes buffered log lines.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let (file_layer, file_guard) = match &config.file {
        Some(file) => {
            let appender = match file.rotation.as_str() {
                "hourly" => tracing_appender::rolling::hourly(&file.directory, &file.prefix),
                "never" => tracing_appender::rolling::never(&file.directory, &file.prefix),
                _ => tracing_appender::rolling::daily(&file.directory, &file.prefix),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if config.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
