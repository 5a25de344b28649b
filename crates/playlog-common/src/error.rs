//! Error types and utilities for Playlog

use thiserror::Error;

/// Result type alias for Playlog operations
pub type Result<T> = std::result::Result<T, PlaylogError>;

/// Main error type for Playlog operations
#[derive(Error, Debug)]
pub enum PlaylogError {
    /// No events to aggregate, or a filter matched zero events
    #[error("Empty dataset: {context}")]
    EmptyDataset {
        /// What was being computed when the emptiness was detected
        context: String,
    },

    /// A caller-supplied argument is out of range
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument
        argument: String,
        /// Human readable reason
        message: String,
    },

    /// A source record is missing a field or carries an unusable value
    #[error("Malformed record #{index} in {document}: {message}")]
    MalformedRecord {
        /// Name of the document the record came from
        document: String,
        /// Zero-based position of the record inside its document
        index: usize,
        /// Human readable reason
        message: String,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human readable reason
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlaylogError {
    /// Create a new empty dataset error
    pub fn empty_dataset(context: impl Into<String>) -> Self {
        Self::EmptyDataset {
            context: context.into(),
        }
    }

    /// Create a new invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a new malformed record error
    pub fn malformed_record(
        document: impl Into<String>,
        index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            document: document.into(),
            index,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error stems from the data rather than from the caller or environment
    pub const fn is_data_error(&self) -> bool {
        matches!(self, Self::EmptyDataset { .. } | Self::MalformedRecord { .. })
    }
}
