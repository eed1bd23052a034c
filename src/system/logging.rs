//! Logging system initialization
//!
//! The subscriber is built from [`LoggingConfig`] by [`build_dispatch`] and
//! installed once by the binary through [`init_logging`]. Library code only
//! emits events through `tracing` macros.

use std::io::Write;

use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{Result, SnaplinkError};

fn open_writer(config: &LoggingConfig) -> Result<(Box<dyn Write + Send + Sync>, bool)> {
    match config.file.as_deref() {
        Some(path) if !path.is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    SnaplinkError::config(format!("failed to open log file {}: {}", path, e))
                })?;
            Ok((Box::new(file), false))
        }
        _ => Ok((Box::new(std::io::stdout()), true)),
    }
}

/// Build a subscriber for `config` without installing it.
///
/// The returned [`WorkerGuard`] flushes the non-blocking writer on drop and
/// must outlive every log call.
pub fn build_dispatch(config: &LoggingConfig) -> Result<(Dispatch, WorkerGuard)> {
    let (writer, is_console) = open_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        SnaplinkError::config(format!("invalid log level '{}': {}", config.level, e))
    })?;

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true);

    let dispatch = match config.format {
        LogFormat::Json => Dispatch::new(builder.json().with_ansi(false).finish()),
        LogFormat::Text => Dispatch::new(builder.with_ansi(is_console).finish()),
    };

    Ok((dispatch, guard))
}

/// Install the subscriber process-wide. Call once, before the server starts.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    let (dispatch, guard) = build_dispatch(config)?;
    tracing::dispatcher::set_global_default(dispatch)?;

    if config.format == LogFormat::Text {
        tracing::info!("Development logging enabled");
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_rejected() {
        let config = LoggingConfig {
            level: "snaplink=notalevel".to_string(),
            ..LoggingConfig::default()
        };
        let err = build_dispatch(&config).err().expect("level should be rejected");
        assert!(matches!(err, SnaplinkError::Config(_)));
    }

    #[test]
    fn test_build_both_formats() {
        for format in [LogFormat::Json, LogFormat::Text] {
            let config = LoggingConfig {
                format,
                ..LoggingConfig::default()
            };
            let (dispatch, _guard) = build_dispatch(&config).unwrap();
            tracing::dispatcher::with_default(&dispatch, || {
                tracing::info!(format = ?format, "logging smoke test");
            });
        }
    }

    #[test]
    fn test_file_writer_appends() {
        let path = std::env::temp_dir().join(format!(
            "snaplink-log-{}.log",
            uuid::Uuid::new_v4()
        ));
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            ..LoggingConfig::default()
        };

        {
            let (dispatch, _guard) = build_dispatch(&config).unwrap();
            tracing::dispatcher::with_default(&dispatch, || {
                tracing::info!("written to file");
            });
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("written to file"));
        let _ = std::fs::remove_file(&path);
    }
}
