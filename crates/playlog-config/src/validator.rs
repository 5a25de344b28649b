//! Runtime validation of a fully merged configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use std::path::Path;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.data.sources.is_empty() {
            return Err(ConfigError::invalid(
                "data.sources",
                "at least one streaming history document is required",
            ));
        }

        for (i, source) in config.data.sources.iter().enumerate() {
            validate_source_path(source)
                .map_err(|message| ConfigError::invalid(format!("data.sources[{i}]"), message))?;
        }

        if config.report.top_n == 0 {
            return Err(ConfigError::invalid("report.top_n", "must be at least 1"));
        }

        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid("logging.level", "cannot be empty"));
        }

        Ok(())
    }
}

/// Validate a source path (basic check for usable path characters)
fn validate_source_path(path: &Path) -> Result<(), &'static str> {
    let Some(text) = path.to_str() else {
        return Err("path is not valid UTF-8");
    };

    if text.trim().is_empty() {
        return Err("path cannot be empty");
    }

    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if text.chars().any(|c| invalid_chars.contains(&c)) {
        return Err("path contains invalid characters");
    }

    Ok(())
}
