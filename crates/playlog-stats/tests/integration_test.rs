//! End-to-end tests: export files on disk through to dashboard reports.

use playlog_common::test_utils::history_fixtures::{
    document_json, record_json, sample_history_document, sparse_two_day_document,
};
use playlog_common::test_utils::{create_temp_dir, init_test_logging};
use playlog_common::{PlaylogError, Selection};
use playlog_stats::{load_files, AggregationEngine, DayOfWeek, ReportBuilder};
use std::fs;

#[test]
fn test_load_files_and_fill_silent_day() {
    init_test_logging();
    let dir = create_temp_dir();
    let path = dir.path().join("StreamingHistory_music_0.json");
    fs::write(&path, sparse_two_day_document()).unwrap();

    let store = load_files(&[&path]).unwrap();
    let averages = AggregationEngine::new(&store).average_by_day_of_week().unwrap();

    // 2024-01-01 is a Monday: Mon 60000, Tue 0 (filled), Wed 30000.
    let values: Vec<(DayOfWeek, f64)> = averages.iter().map(|p| (p.key, p.value)).collect();
    assert_eq!(values.len(), 3);
    assert_eq!(values[0].0.abbreviation(), "Mon");
    assert!((values[0].1 - 60_000.0).abs() < 1e-9);
    assert!(values[1].1.abs() < 1e-9);
    assert!((values[2].1 - 30_000.0).abs() < 1e-9);
}

#[test]
fn test_multiple_files_concatenate() {
    let dir = create_temp_dir();
    let first = dir.path().join("StreamingHistory_music_0.json");
    let second = dir.path().join("StreamingHistory_music_1.json");
    fs::write(&first, sample_history_document()).unwrap();
    fs::write(
        &second,
        document_json(&[record_json("Radiohead", "Nude", "2024-03-01 07:00", 100_000)]),
    )
    .unwrap();

    let store = load_files(&[&first, &second]).unwrap();
    assert_eq!(store.len(), 8);

    let top = AggregationEngine::new(&store).top_artists(1).unwrap();
    assert_eq!(top[0].key, "Radiohead");
    assert_eq!(top[0].value, 290_000 + 255_000 + 290_000 + 100_000);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = create_temp_dir();
    let err = load_files(&[dir.path().join("absent.json")]).unwrap_err();
    assert!(matches!(err, PlaylogError::Io(_)));
}

#[test]
fn test_malformed_second_file_fails_whole_load() {
    let dir = create_temp_dir();
    let good = dir.path().join("good.json");
    let bad = dir.path().join("bad.json");
    fs::write(&good, sample_history_document()).unwrap();
    fs::write(&bad, r#"[{"artistName": "A", "trackName": "x", "endTime": "nope", "msPlayed": 1}]"#).unwrap();

    let err = load_files(&[&good, &bad]).unwrap_err();
    match err {
        PlaylogError::MalformedRecord { document, index, .. } => {
            assert!(document.ends_with("bad.json"));
            assert_eq!(index, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reports_for_all_and_each_month() {
    let dir = create_temp_dir();
    let path = dir.path().join("history.json");
    fs::write(&path, sample_history_document()).unwrap();
    let store = load_files(&[&path]).unwrap();
    let builder = ReportBuilder::new(2);

    let all = builder.build(&store, Selection::All).unwrap();
    assert_eq!(all.month_options.len(), 3);
    assert_eq!(all.top_tracks.points.len(), 2);
    assert_eq!(all.top_tracks.points[0].label, "Reckoner by Radiohead");

    for option in all.month_options.iter().skip(1) {
        let selection: Selection = option.value.parse().unwrap();
        let report = builder.build(&store, selection).unwrap();
        assert!(report.top_artists.title.ends_with(&option.label));
        assert!(report.monthly.is_none());
    }
}
