//! Type-safe default values.

use crate::schema::ReportConfig;
use playlog_common::Selection;

/// Default size of the top-n series.
pub const DEFAULT_TOP_N: usize = 5;

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            selection: Selection::All,
            pretty: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::Config;
    use playlog_common::{LogFormat, Selection};

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.data.sources.is_empty());
        assert_eq!(config.report.top_n, 5);
        assert_eq!(config.report.selection, Selection::All);
        assert!(config.report.pretty);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }
}
