//! Test utilities and shared test helpers for Playlog.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Test fixture for a timezone-naive timestamp.
pub fn mock_timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, min, 0))
        .expect("valid test timestamp")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Streaming history documents shaped like the export files.
pub mod history_fixtures {
    /// A single raw record as it appears in an export document.
    pub fn record_json(artist: &str, track: &str, end_time: &str, ms_played: u64) -> String {
        format!(
            r#"{{"endTime": "{end_time}", "artistName": "{artist}", "trackName": "{track}", "msPlayed": {ms_played}}}"#
        )
    }

    /// Wraps records into a JSON array document.
    pub fn document_json(records: &[String]) -> String {
        format!("[{}]", records.join(",\n"))
    }

    /// Two plays of the same track two days apart (one silent day between).
    pub fn sparse_two_day_document() -> String {
        document_json(&[
            record_json("A", "x", "2024-01-01 10:00", 60_000),
            record_json("A", "x", "2024-01-03 10:00", 30_000),
        ])
    }

    /// A small multi-artist history spanning two months.
    pub fn sample_history_document() -> String {
        document_json(&[
            record_json("Radiohead", "Reckoner", "2024-01-29 21:15", 290_000),
            record_json("Radiohead", "Nude", "2024-01-30 08:02", 255_000),
            record_json("Björk", "Hyperballad", "2024-01-30 08:07", 321_000),
            record_json("Portishead", "Roads", "2024-02-03 23:40", 303_000),
            record_json("Radiohead", "Reckoner", "2024-02-04 00:10", 290_000),
            record_json("Björk", "Jóga", "2024-02-04 13:30", 305_000),
            record_json("Portishead", "Glory Box", "2024-02-05 18:45", 12_000),
        ])
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
data:
  sources:
    - "StreamingHistory_music_0.json"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "data:\n",
            "  sources:\n",
            "    - \"StreamingHistory_music_0.json\"\n",
            "    - \"StreamingHistory_music_1.json\"\n",
            "report:\n",
            "  top_n: 10\n",
            "  selection: \"2024 02\"\n",
            "  pretty: false\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"json\"\n",
        )
    }
}
