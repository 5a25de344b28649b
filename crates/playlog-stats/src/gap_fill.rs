//! Sparse aggregation followed by densification onto a full calendar range.

use crate::calendar::{calendar_range, CalendarRange, DateHour, Daily, Granularity, Hourly};
use crate::event::PlayEvent;
use chrono::NaiveDate;
use playlog_common::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Total listening time inside one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket<K> {
    /// Bucket key (a date, or a date and hour)
    pub key: K,
    /// Sum of `ms_played` of events in this bucket; 0 when none
    pub total_ms_played: u64,
}

/// One calendar day of listening time.
pub type DayBucket = Bucket<NaiveDate>;

/// One hour of one calendar day of listening time.
pub type HourBucket = Bucket<DateHour>;

/// Sums `ms_played` per observed bucket. Only buckets with events appear.
pub fn sparse_totals<G: Granularity>(events: &[PlayEvent]) -> BTreeMap<G::Key, u64> {
    events.iter().fold(BTreeMap::new(), |mut totals, event| {
        *totals.entry(G::key_of(event)).or_insert(0) += event.ms_played();
        totals
    })
}

/// Left-joins `range` against `sparse`, substituting 0 for missing keys.
///
/// The output follows `range` order exactly, one bucket per key. Sparse keys
/// outside `range` are ignored.
pub fn densify<K, I>(sparse: &BTreeMap<K, u64>, range: I) -> Vec<Bucket<K>>
where
    K: Copy + Ord,
    I: IntoIterator<Item = K>,
{
    range
        .into_iter()
        .map(|key| Bucket {
            key,
            total_ms_played: sparse.get(&key).copied().unwrap_or(0),
        })
        .collect()
}

/// Gap-filled buckets for `events` at granularity `G`.
///
/// Fails with `EmptyDataset` when `events` is empty.
pub fn fill_gaps<G: Granularity>(events: &[PlayEvent]) -> Result<Vec<Bucket<G::Key>>> {
    let range: CalendarRange<G> = calendar_range(events)?;
    let sparse = sparse_totals::<G>(events);
    let observed = sparse.len();

    let buckets = densify(&sparse, range);

    debug!(
        granularity = G::NAME,
        observed,
        filled = buckets.len().saturating_sub(observed),
        "Densified buckets"
    );
    Ok(buckets)
}

/// One bucket per calendar day from the first to the last observed date.
#[instrument(skip(events), fields(events = events.len()))]
pub fn day_buckets(events: &[PlayEvent]) -> Result<Vec<DayBucket>> {
    fill_gaps::<Daily>(events)
}

/// One bucket per hour from the first to the last observed (date, hour).
#[instrument(skip(events), fields(events = events.len()))]
pub fn hour_buckets(events: &[PlayEvent]) -> Result<Vec<HourBucket>> {
    fill_gaps::<Hourly>(events)
}
