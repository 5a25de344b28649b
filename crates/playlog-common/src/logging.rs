//! Structured logging infrastructure for Playlog

use crate::error::{PlaylogError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Output format of the log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human oriented output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "playlog_stats=trace")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
    /// Whether to log span open/close events
    pub include_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_targets: true,
            include_spans: false,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over `config.level` when it is set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| PlaylogError::config_with_source(format!("invalid log level `{}`", config.level), e))?;

    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let file = match config.file_path.as_deref() {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    // Each arm builds a differently typed layer, so the writer choice is repeated per format.
    let init_result = match (config.format, file) {
        (LogFormat::Json, Some(file)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Json, None) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Compact, None) => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_span_events(span_events)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init(),
        (LogFormat::Pretty, None) => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(span_events)
                    .with_target(config.include_targets),
            )
            .try_init(),
    };

    init_result.map_err(|e| PlaylogError::config_with_source("failed to install log subscriber", e))?;

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        file = config.file_path.as_deref().unwrap_or("-"),
        "Logging initialized"
    );
    Ok(())
}

/// Initialize logging with default configuration
pub fn init_default_logging() -> Result<()> {
    init_logging(&LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file_path.is_none());
        assert!(config.include_targets);
        assert!(!config.include_spans);
    }

    #[test]
    fn test_init_logging_writes_to_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("playlog.log");
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            file_path: Some(path.display().to_string()),
            ..LoggingConfig::default()
        };

        init_logging(&config).unwrap();
        if std::env::var_os("RUST_LOG").is_none() {
            let written = std::fs::read_to_string(&path).unwrap();
            assert!(written.contains("Logging initialized"), "{written}");
        }

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, PlaylogError::Config { .. }));
    }

    #[test]
    fn test_format_deserialization() {
        let config: LoggingConfig = serde_json::from_str(r#"{"level": "debug", "format": "json"}"#).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.include_targets);
    }
}
