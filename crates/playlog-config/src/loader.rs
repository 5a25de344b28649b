//! Configuration loading utilities

use crate::schema::Config;
use crate::validator::ConfigValidator;
use playlog_common::{PlaylogError, Selection};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "PLAYLOG_CONFIG_PATH";
/// Comma-separated list of streaming history documents.
pub const SOURCES_ENV: &str = "PLAYLOG_SOURCES";
/// Size of the top-n series.
pub const TOP_N_ENV: &str = "PLAYLOG_TOP_N";
/// Report selection (`all` or `YYYY MM`).
pub const SELECTION_ENV: &str = "PLAYLOG_SELECTION";
/// Log level filter.
pub const LOG_LEVEL_ENV: &str = "PLAYLOG_LOG_LEVEL";

const DEFAULT_CONFIG_FILES: [&str; 2] = ["playlog.yaml", "playlog.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", .path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        /// Variable name
        var: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Invalid configuration field `{field}`: {message}")]
    Validation {
        /// Dotted path of the offending field
        field: String,
        /// Human readable reason
        message: String,
    },
}

impl ConfigError {
    /// Create a new validation error for `field`
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<ConfigError> for PlaylogError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source("configuration could not be loaded", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::parse_file(path.as_ref())?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from the first file found, falling back to defaults.
    ///
    /// Lookup order: `PLAYLOG_CONFIG_PATH`, then `playlog.yaml` / `playlog.yml`
    /// in the working directory.
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from(Self::locate().as_deref())
    }

    /// The configuration file [`load`](Self::load) would read, if any.
    pub fn locate() -> Option<PathBuf> {
        env::var_os(CONFIG_PATH_ENV).map(PathBuf::from).or_else(|| {
            DEFAULT_CONFIG_FILES
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
        })
    }

    /// Load from `path`, or from defaults plus environment overrides when `None`.
    pub fn load_from(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_config(path),
            None => {
                info!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                ConfigValidator::validate(&config)?;
                Ok(config)
            }
        }
    }

    /// Parse a YAML document without overrides or validation
    pub fn parse_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        debug!(path = %path.display(), "Reading configuration file");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(sources) = lookup(SOURCES_ENV) {
            config.data.sources = sources
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(top_n) = lookup(TOP_N_ENV) {
            config.report.top_n = top_n.trim().parse().map_err(|e| ConfigError::EnvParse {
                var: TOP_N_ENV.to_string(),
                source: Box::new(e),
            })?;
        }

        if let Some(selection) = lookup(SELECTION_ENV) {
            config.report.selection =
                selection
                    .parse::<Selection>()
                    .map_err(|e| ConfigError::EnvParse {
                        var: SELECTION_ENV.to_string(),
                        source: Box::new(e),
                    })?;
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config.logging.level = level;
        }

        Ok(())
    }
}
