//! Configuration schema definitions using serde.

use playlog_common::{LoggingConfig, Selection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Playlog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the streaming history comes from.
    pub data: DataConfig,
    /// What the generated report contains.
    pub report: ReportConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Data source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Streaming history documents, concatenated in the listed order.
    pub sources: Vec<PathBuf>,
}

/// Report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of entries in the top artists and top tracks series.
    pub top_n: usize,
    /// Whether the report covers all data or a single month.
    pub selection: Selection,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}
