//! Integration tests for the playlog application pipeline.

use playlog::{AppError, PlaylogApp};
use playlog_common::test_utils::history_fixtures::sample_history_document;
use playlog_common::test_utils::{create_temp_dir, init_test_logging};
use playlog_common::Selection;
use playlog_config::{Config, ConfigLoader};
use serde_json::Value;
use std::fs;
use std::path::Path;

fn config_for(source: &Path, selection: Selection) -> Config {
    let mut config = Config::default();
    config.data.sources = vec![source.to_path_buf()];
    config.report.top_n = 3;
    config.report.selection = selection;
    config.report.pretty = false;
    config
}

fn run(app: &PlaylogApp) -> Result<Value, AppError> {
    let mut out = Vec::new();
    app.run(&mut out)?;
    Ok(serde_json::from_slice(&out).unwrap())
}

#[test]
fn test_run_writes_all_data_report() {
    init_test_logging();
    let dir = create_temp_dir();
    let source = dir.path().join("StreamingHistory_music_0.json");
    fs::write(&source, sample_history_document()).unwrap();

    let report = run(&PlaylogApp::new(config_for(&source, Selection::All))).unwrap();

    assert_eq!(report["selection"], "all");
    assert_eq!(report["top_artists"]["title"], "Top 3 Most Played Artists");
    assert_eq!(report["month_options"][0]["value"], "all");
    assert_eq!(report["month_options"][2]["label"], "February 2024");
    assert!(report["monthly"]["points"].is_array());
    assert!(report["hour_of_day"]["points"].is_array());
}

#[test]
fn test_run_writes_month_report() {
    let dir = create_temp_dir();
    let source = dir.path().join("history.json");
    fs::write(&source, sample_history_document()).unwrap();

    let selection: Selection = "2024-02".parse().unwrap();
    let report = run(&PlaylogApp::new(config_for(&source, selection))).unwrap();

    assert_eq!(report["selection"], "2024 02");
    assert_eq!(report["top_artists"]["title"], "Top 3 Artists of February 2024");
    assert!(report.get("monthly").is_none());
}

#[test]
fn test_month_without_plays_is_data_error() {
    let dir = create_temp_dir();
    let source = dir.path().join("history.json");
    fs::write(&source, sample_history_document()).unwrap();

    let selection: Selection = "2023 05".parse().unwrap();
    let err = run(&PlaylogApp::new(config_for(&source, selection))).unwrap_err();
    assert!(err.is_data_error());
}

#[test]
fn test_missing_source_is_not_data_error() {
    let dir = create_temp_dir();
    let app = PlaylogApp::new(config_for(&dir.path().join("absent.json"), Selection::All));

    let err = run(&app).unwrap_err();
    assert!(matches!(err, AppError::Stats(_)));
    assert!(!err.is_data_error());
}

#[test]
fn test_config_file_drives_the_pipeline() {
    let dir = create_temp_dir();
    let source = dir.path().join("history.json");
    fs::write(&source, sample_history_document()).unwrap();

    let config_path = dir.path().join("playlog.yaml");
    let yaml = format!(
        "data:\n  sources:\n    - \"{}\"\nreport:\n  top_n: 1\n  pretty: true\n",
        source.display()
    );
    fs::write(&config_path, yaml).unwrap();

    let config = ConfigLoader::parse_str(&fs::read_to_string(&config_path).unwrap()).unwrap();
    let app = PlaylogApp::new(config);
    let report = run(&app).unwrap();

    assert_eq!(report["top_artists"]["points"].as_array().unwrap().len(), 1);
    assert_eq!(report["top_artists"]["points"][0]["key"], "Radiohead");
}
