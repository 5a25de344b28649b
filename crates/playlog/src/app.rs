//! Report generation pipeline: sources to store to report to JSON.

use crate::error::AppResult;
use playlog_common::PlaylogError;
use playlog_config::Config;
use playlog_stats::{load_files, DashboardReport, EventStore, ReportBuilder};
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Main application structure.
pub struct PlaylogApp {
    config: Arc<Config>,
}

impl PlaylogApp {
    /// Creates a new application instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingests every configured source, in order.
    #[instrument(skip(self), fields(sources = self.config.data.sources.len()))]
    pub fn load_store(&self) -> AppResult<EventStore> {
        Ok(load_files(&self.config.data.sources)?)
    }

    /// Builds the report for the configured selection.
    pub fn build_report(&self, store: &EventStore) -> AppResult<DashboardReport> {
        let report = &self.config.report;
        Ok(ReportBuilder::new(report.top_n).build(store, report.selection)?)
    }

    /// Serializes a report as JSON, pretty-printed when configured.
    pub fn render(&self, report: &DashboardReport) -> AppResult<String> {
        let rendered = if self.config.report.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        Ok(rendered.map_err(PlaylogError::from)?)
    }

    /// Runs the whole pipeline, writing the report to `out`.
    pub fn run<W: Write>(&self, out: &mut W) -> AppResult<()> {
        let store = self.load_store()?;
        let report = self.build_report(&store)?;
        let rendered = self.render(&report)?;

        debug!(bytes = rendered.len(), "Rendered report");
        writeln!(out, "{rendered}")?;
        info!(events = store.len(), selection = %report.selection, "Report written");
        Ok(())
    }
}
