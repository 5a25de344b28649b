//! Property tests for gap-filling and the aggregation engine.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use playlog_stats::{day_buckets, hour_buckets, AggregationEngine, EventStore, PlayEvent};
use proptest::prelude::*;
use std::collections::HashSet;

const ARTISTS: [&str; 4] = ["Radiohead", "Björk", "Portishead", "Massive Attack"];
const TRACKS: [&str; 3] = ["One", "Two", "Three"];

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn event_strategy() -> impl Strategy<Value = PlayEvent> {
    (0i64..90 * 24 * 60, 0usize..ARTISTS.len(), 0usize..TRACKS.len(), 0u64..600_000).prop_map(
        |(minute, artist, track, ms)| {
            let end_time = base() + Duration::minutes(minute);
            PlayEvent::new(ARTISTS[artist], TRACKS[track], end_time, ms).unwrap()
        },
    )
}

fn events_strategy() -> impl Strategy<Value = Vec<PlayEvent>> {
    prop::collection::vec(event_strategy(), 1..60)
}

proptest! {
    #[test]
    fn prop_day_buckets_cover_every_day(events in events_strategy()) {
        let buckets = day_buckets(&events).unwrap();
        let first = events.iter().map(PlayEvent::date).min().unwrap();
        let last = events.iter().map(PlayEvent::date).max().unwrap();

        let expected = usize::try_from((last - first).num_days() + 1).unwrap();
        prop_assert_eq!(buckets.len(), expected);
        prop_assert_eq!(buckets.first().unwrap().key, first);
        prop_assert_eq!(buckets.last().unwrap().key, last);
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].key.succ_opt().unwrap(), pair[1].key);
        }
    }

    #[test]
    fn prop_gap_filling_preserves_total(events in events_strategy()) {
        let total: u64 = events.iter().map(PlayEvent::ms_played).sum();

        let day_total: u64 = day_buckets(&events).unwrap().iter().map(|b| b.total_ms_played).sum();
        let hour_total: u64 = hour_buckets(&events).unwrap().iter().map(|b| b.total_ms_played).sum();

        prop_assert_eq!(day_total, total);
        prop_assert_eq!(hour_total, total);
    }

    #[test]
    fn prop_hour_buckets_are_consecutive(events in events_strategy()) {
        let buckets = hour_buckets(&events).unwrap();
        for pair in buckets.windows(2) {
            prop_assert_eq!(pair[0].key.succ().unwrap(), pair[1].key);
        }
    }

    #[test]
    fn prop_uniform_week_has_equal_weekday_averages(start in 0i64..300, ms in 0u64..10_000_000) {
        let events: Vec<PlayEvent> = (0..7)
            .map(|day| {
                let end_time = base() + Duration::days(start + day) + Duration::hours(12);
                PlayEvent::new("A", "x", end_time, ms).unwrap()
            })
            .collect();
        let store = EventStore::new(events);
        let averages = AggregationEngine::new(&store).average_by_day_of_week().unwrap();

        prop_assert_eq!(averages.len(), 7);
        for point in &averages {
            prop_assert!((point.value - averages[0].value).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_top_n_is_sorted_subset(events in events_strategy(), n in 1usize..8) {
        let store = EventStore::new(events);
        let engine = AggregationEngine::new(&store);
        let totals = engine.totals_by_artist().unwrap();
        let top = engine.top_artists(n).unwrap();

        prop_assert_eq!(top.len(), n.min(totals.len()));
        for pair in top.windows(2) {
            prop_assert!(
                pair[0].value > pair[1].value || (pair[0].value == pair[1].value && pair[0].key < pair[1].key)
            );
        }
        for point in &top {
            prop_assert!(totals.contains(point));
        }

        let distinct: HashSet<&String> = top.iter().map(|p| &p.key).collect();
        prop_assert_eq!(distinct.len(), top.len());
    }

    #[test]
    fn prop_aggregations_are_deterministic(events in events_strategy()) {
        let store = EventStore::new(events);
        let engine = AggregationEngine::new(&store);

        prop_assert_eq!(engine.totals_by_track().unwrap(), engine.totals_by_track().unwrap());
        prop_assert_eq!(engine.average_by_hour().unwrap(), engine.average_by_hour().unwrap());
        prop_assert_eq!(engine.top_tracks(3).unwrap(), engine.top_tracks(3).unwrap());
    }

    #[test]
    fn prop_month_filter_partitions_store(events in events_strategy()) {
        let store = EventStore::new(events);
        let filtered_total: u64 = store
            .months()
            .into_iter()
            .map(|ym| store.filter_by_month(ym.year(), ym.month()).unwrap().total_ms_played())
            .sum();

        prop_assert_eq!(filtered_total, store.total_ms_played());
    }
}
