//! Application-wide error types using thiserror.

use playlog_common::PlaylogError;
use playlog_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Ingestion or aggregation error.
    #[error(transparent)]
    Stats(#[from] PlaylogError),

    /// Failure writing the report.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl AppError {
    /// Whether the input data, rather than the setup, caused the failure.
    pub const fn is_data_error(&self) -> bool {
        match self {
            Self::Stats(err) => err.is_data_error(),
            Self::Config(_) | Self::Output(_) => false,
        }
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
