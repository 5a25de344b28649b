//! Aggregation engine: totals, gap-filled averages and top-n rankings.

use crate::event::{DayOfWeek, DayType, PlayEvent};
use crate::gap_fill::{day_buckets, hour_buckets, Bucket};
use crate::store::EventStore;
use playlog_common::{PlaylogError, Result, YearMonth};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// One chart-ready `(key, value)` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint<K, V> {
    /// Grouping key
    pub key: K,
    /// Aggregated value
    pub value: V,
}

impl<K, V> DataPoint<K, V> {
    /// Creates a data point.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

/// A track identified together with its artist.
///
/// Ordered by artist, then track name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TrackKey {
    /// Artist name
    pub artist: String,
    /// Track name
    pub track: String,
}

impl TrackKey {
    fn of(event: &PlayEvent) -> Self {
        Self {
            artist: event.artist().to_string(),
            track: event.track().to_string(),
        }
    }
}

/// Pure, deterministic statistics over one [`EventStore`].
///
/// Every operation fails with `EmptyDataset` when the store has no events.
#[derive(Debug, Clone, Copy)]
pub struct AggregationEngine<'a> {
    store: &'a EventStore,
}

impl<'a> AggregationEngine<'a> {
    /// Engine reading from `store`.
    pub const fn new(store: &'a EventStore) -> Self {
        Self { store }
    }

    /// The store this engine reads from.
    pub const fn store(&self) -> &'a EventStore {
        self.store
    }

    /// Total listening time per artist, ordered by artist name.
    pub fn totals_by_artist(&self) -> Result<Vec<DataPoint<String, u64>>> {
        let events = self.store.require_events("totals by artist")?;
        Ok(into_points(sum_by(events, |e| e.artist().to_string())))
    }

    /// Total listening time per (artist, track), ordered by artist then track.
    pub fn totals_by_track(&self) -> Result<Vec<DataPoint<TrackKey, u64>>> {
        let events = self.store.require_events("totals by track")?;
        Ok(into_points(sum_by(events, TrackKey::of)))
    }

    /// Total listening time per observed month, chronologically.
    ///
    /// Months without plays are absent rather than zero-filled.
    pub fn totals_by_month(&self) -> Result<Vec<DataPoint<YearMonth, u64>>> {
        let events = self.store.require_events("totals by month")?;
        Ok(into_points(sum_by(events, PlayEvent::year_month)))
    }

    /// Mean daily listening time per day of week over gap-filled days.
    ///
    /// Days in range with no plays count as 0 toward their weekday's mean.
    /// Only weekdays present in the range appear, Monday first.
    #[instrument(skip(self), fields(events = self.store.len()))]
    pub fn average_by_day_of_week(&self) -> Result<Vec<DataPoint<DayOfWeek, f64>>> {
        let events = self.store.require_events("average by day of week")?;
        let buckets = day_buckets(events)?;
        Ok(mean_by(&buckets, |date| DayOfWeek::of(*date)))
    }

    /// Mean listening time per hour of day over gap-filled hours.
    ///
    /// Hours in range with no plays count as 0 toward their hour's mean.
    /// Only hours present in the range appear, ascending.
    #[instrument(skip(self), fields(events = self.store.len()))]
    pub fn average_by_hour(&self) -> Result<Vec<DataPoint<u32, f64>>> {
        let events = self.store.require_events("average by hour")?;
        let buckets = hour_buckets(events)?;
        Ok(mean_by(&buckets, |date_hour| date_hour.hour))
    }

    /// Total listening time on weekdays and on weekends, weekdays first.
    ///
    /// Both keys are always present.
    pub fn total_by_day_type(&self) -> Result<Vec<DataPoint<DayType, u64>>> {
        let events = self.store.require_events("total by weekday vs weekend")?;
        let mut totals: BTreeMap<DayType, u64> =
            [(DayType::Weekday, 0), (DayType::Weekend, 0)].into_iter().collect();
        for event in events {
            *totals.entry(DayType::from(event.day_of_week())).or_insert(0) += event.ms_played();
        }
        Ok(into_points(totals))
    }

    /// The `n` artists with the most listening time.
    ///
    /// Sorted by total descending; ties are broken by artist name ascending.
    pub fn top_artists(&self, n: usize) -> Result<Vec<DataPoint<String, u64>>> {
        validate_top_n(n)?;
        Ok(top_n(self.totals_by_artist()?, n))
    }

    /// The `n` tracks with the most listening time.
    ///
    /// Sorted by total descending; ties are broken by artist, then track name.
    pub fn top_tracks(&self, n: usize) -> Result<Vec<DataPoint<TrackKey, u64>>> {
        validate_top_n(n)?;
        Ok(top_n(self.totals_by_track()?, n))
    }

    /// A new store holding only events from `year`/`month`.
    ///
    /// See [`EventStore::filter_by_month`].
    pub fn filter_by_month(&self, year: i32, month: u32) -> Result<EventStore> {
        self.store.filter_by_month(year, month)
    }
}

fn validate_top_n(n: usize) -> Result<()> {
    if n == 0 {
        Err(PlaylogError::invalid_argument("n", "must be at least 1"))
    } else {
        Ok(())
    }
}

// Each event is at most MAX_MS_PLAYED, so u64 sums over a store cannot overflow.
fn sum_by<K, F>(events: &[PlayEvent], key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&PlayEvent) -> K,
{
    events.iter().fold(BTreeMap::new(), |mut totals, event| {
        *totals.entry(key(event)).or_insert(0) += event.ms_played();
        totals
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean_by<B, K, F>(buckets: &[Bucket<B>], key: F) -> Vec<DataPoint<K, f64>>
where
    K: Ord,
    F: Fn(&B) -> K,
{
    let mut groups: BTreeMap<K, (u64, u64)> = BTreeMap::new();
    for bucket in buckets {
        let (sum, count) = groups.entry(key(&bucket.key)).or_insert((0, 0));
        *sum += bucket.total_ms_played;
        *count += 1;
    }

    debug!(buckets = buckets.len(), groups = groups.len(), "Averaged gap-filled buckets");

    groups
        .into_iter()
        .map(|(key, (sum, count))| DataPoint::new(key, sum as f64 / count as f64))
        .collect()
}

fn into_points<K, V>(map: BTreeMap<K, V>) -> Vec<DataPoint<K, V>> {
    map.into_iter().map(|(key, value)| DataPoint::new(key, value)).collect()
}

fn top_n<K: Ord>(mut points: Vec<DataPoint<K, u64>>, n: usize) -> Vec<DataPoint<K, u64>> {
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
    points.truncate(n);
    points
}
