//! Calendar range construction over observed bucket keys.
//!
//! A [`Granularity`] names a bucket key type and how to step from one key to
//! the next. [`CalendarRange`] lazily walks every key from the first observed
//! bucket to the last, inclusive, so callers can densify sparse aggregates
//! without materializing the range up front.

use crate::event::PlayEvent;
use chrono::NaiveDate;
use playlog_common::{PlaylogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Bucket width used to aggregate events over time.
pub trait Granularity {
    /// Bucket key; its `Ord` must agree with chronological order.
    type Key: Copy + Ord + Hash + Debug;

    /// Human readable name used in logs and errors.
    const NAME: &'static str;

    /// Bucket an event falls into.
    fn key_of(event: &PlayEvent) -> Self::Key;

    /// The bucket immediately after `key`, or `None` past the end of the calendar.
    fn step(key: Self::Key) -> Option<Self::Key>;

    /// Number of steps from `start` to `end`; zero when `end <= start`.
    fn steps_between(start: Self::Key, end: Self::Key) -> usize;
}

/// One bucket per calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct Daily;

impl Granularity for Daily {
    type Key = NaiveDate;

    const NAME: &'static str = "daily";

    fn key_of(event: &PlayEvent) -> NaiveDate {
        event.date()
    }

    fn step(key: NaiveDate) -> Option<NaiveDate> {
        key.succ_opt()
    }

    fn steps_between(start: NaiveDate, end: NaiveDate) -> usize {
        usize::try_from((end - start).num_days()).unwrap_or(0)
    }
}

/// A calendar date together with an hour of that day.
///
/// Ordered lexicographically by `(date, hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateHour {
    /// Calendar date
    pub date: NaiveDate,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl DateHour {
    /// Creates a date-hour pair; `None` when `hour` is not 0-23.
    pub const fn new(date: NaiveDate, hour: u32) -> Option<Self> {
        if hour < 24 {
            Some(Self { date, hour })
        } else {
            None
        }
    }

    /// The following hour, rolling over to the next day after 23:00.
    pub fn succ(self) -> Option<Self> {
        if self.hour < 23 {
            Some(Self {
                date: self.date,
                hour: self.hour + 1,
            })
        } else {
            self.date.succ_opt().map(|date| Self { date, hour: 0 })
        }
    }
}

impl fmt::Display for DateHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:00", self.date, self.hour)
    }
}

/// One bucket per hour of every calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hourly;

impl Granularity for Hourly {
    type Key = DateHour;

    const NAME: &'static str = "hourly";

    fn key_of(event: &PlayEvent) -> DateHour {
        DateHour {
            date: event.date(),
            hour: event.hour(),
        }
    }

    fn step(key: DateHour) -> Option<DateHour> {
        key.succ()
    }

    fn steps_between(start: DateHour, end: DateHour) -> usize {
        let days = (end.date - start.date).num_days();
        let hours = days * 24 + i64::from(end.hour) - i64::from(start.hour);
        usize::try_from(hours).unwrap_or(0)
    }
}

/// Inclusive, gap-free, ascending walk over every bucket from `start` to `end`.
#[derive(Debug, Clone)]
pub struct CalendarRange<G: Granularity> {
    next: Option<G::Key>,
    end: G::Key,
    _granularity: PhantomData<G>,
}

impl<G: Granularity> CalendarRange<G> {
    /// Range from `start` to `end`, inclusive. Empty when `start > end`.
    pub fn new(start: G::Key, end: G::Key) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
            _granularity: PhantomData,
        }
    }

    /// Last key of the range.
    pub fn end(&self) -> G::Key {
        self.end
    }
}

impl<G: Granularity> Iterator for CalendarRange<G> {
    type Item = G::Key;

    fn next(&mut self) -> Option<G::Key> {
        let current = self.next?;
        self.next = if current >= self.end {
            None
        } else {
            G::step(current)
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| G::steps_between(next, self.end) + 1);
        (remaining, Some(remaining))
    }
}

impl<G: Granularity> ExactSizeIterator for CalendarRange<G> {}

impl<G: Granularity> FusedIterator for CalendarRange<G> {}

/// Smallest and largest key of a key sequence, or `None` when it is empty.
pub fn key_bounds<K: Copy + Ord>(keys: impl IntoIterator<Item = K>) -> Option<(K, K)> {
    let mut keys = keys.into_iter();
    let first = keys.next()?;
    Some(keys.fold((first, first), |(lo, hi), key| (lo.min(key), hi.max(key))))
}

/// First and last bucket actually observed among `events`.
///
/// For [`Hourly`] the bounds are the earliest and latest observed
/// `(date, hour)` pairs, not midnight of the first day and 23:00 of the last.
pub fn observed_bounds<G: Granularity>(events: &[PlayEvent]) -> Result<(G::Key, G::Key)> {
    key_bounds(events.iter().map(G::key_of))
        .ok_or_else(|| PlaylogError::empty_dataset(format!("{} calendar range", G::NAME)))
}

/// Full calendar range spanned by `events`.
pub fn calendar_range<G: Granularity>(events: &[PlayEvent]) -> Result<CalendarRange<G>> {
    let (start, end) = observed_bounds::<G>(events)?;
    Ok(CalendarRange::new(start, end))
}
