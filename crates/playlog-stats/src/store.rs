//! Immutable, cheaply shareable collection of play events.

use crate::event::PlayEvent;
use playlog_common::{PlaylogError, Result, YearMonth};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Read-only snapshot of loaded play events.
///
/// Cloning shares the underlying events, so a store can be handed to any
/// number of threads serving independent aggregation requests.
#[derive(Debug, Clone)]
pub struct EventStore {
    events: Arc<[PlayEvent]>,
}

impl EventStore {
    /// Wraps events in load order.
    pub fn new(events: Vec<PlayEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// All events, in load order.
    pub fn events(&self) -> &[PlayEvent] {
        &self.events
    }

    /// Iterator over events, in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlayEvent> {
        self.events.iter()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events, or `EmptyDataset` naming `operation` when there are none.
    pub fn require_events(&self, operation: &str) -> Result<&[PlayEvent]> {
        if self.events.is_empty() {
            Err(PlaylogError::empty_dataset(operation.to_string()))
        } else {
            Ok(&self.events)
        }
    }

    /// A new store restricted to events that ended in `year`/`month`.
    ///
    /// The original store is untouched. Fails with `InvalidArgument` for a
    /// month outside 1-12 or an implausible year, and with `EmptyDataset`
    /// when no event matches.
    pub fn filter_by_month(&self, year: i32, month: u32) -> Result<Self> {
        self.filter_by_year_month(YearMonth::new(year, month)?)
    }

    /// [`filter_by_month`](Self::filter_by_month) for an already validated month.
    pub fn filter_by_year_month(&self, year_month: YearMonth) -> Result<Self> {
        let events: Vec<PlayEvent> = self
            .events
            .iter()
            .filter(|event| event.year_month() == year_month)
            .cloned()
            .collect();

        debug!(month = %year_month, matched = events.len(), total = self.len(), "Filtered events by month");

        if events.is_empty() {
            return Err(PlaylogError::empty_dataset(format!("no plays in {}", year_month.label())));
        }
        Ok(Self::new(events))
    }

    /// Months with at least one play, in chronological order.
    pub fn months(&self) -> Vec<YearMonth> {
        self.events
            .iter()
            .map(PlayEvent::year_month)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sum of `ms_played` over every event.
    pub fn total_ms_played(&self) -> u64 {
        self.events.iter().map(PlayEvent::ms_played).sum()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<PlayEvent>> for EventStore {
    fn from(events: Vec<PlayEvent>) -> Self {
        Self::new(events)
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a PlayEvent;
    type IntoIter = std::slice::Iter<'a, PlayEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playlog_common::test_utils::mock_timestamp;

    fn store() -> EventStore {
        EventStore::new(vec![
            PlayEvent::new("A", "x", mock_timestamp(2024, 2, 1, 9, 0), 100).unwrap(),
            PlayEvent::new("B", "y", mock_timestamp(2023, 12, 31, 23, 0), 200).unwrap(),
            PlayEvent::new("A", "z", mock_timestamp(2024, 2, 29, 1, 0), 300).unwrap(),
        ])
    }

    #[test]
    fn test_filter_by_month_keeps_original() {
        let store = store();
        let february = store.filter_by_month(2024, 2).unwrap();

        assert_eq!(february.len(), 2);
        assert_eq!(february.total_ms_played(), 400);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_filter_by_month_errors() {
        let store = store();
        assert!(matches!(store.filter_by_month(2024, 13), Err(PlaylogError::InvalidArgument { .. })));
        assert!(matches!(store.filter_by_month(2024, 0), Err(PlaylogError::InvalidArgument { .. })));
        assert!(matches!(store.filter_by_month(-5, 1), Err(PlaylogError::InvalidArgument { .. })));
        assert!(matches!(store.filter_by_month(2024, 3), Err(PlaylogError::EmptyDataset { .. })));
    }

    #[test]
    fn test_months_are_distinct_and_sorted() {
        let months = store().months();
        assert_eq!(
            months,
            vec![YearMonth::new(2023, 12).unwrap(), YearMonth::new(2024, 2).unwrap()]
        );
    }

    #[test]
    fn test_require_events() {
        assert!(store().require_events("totals").is_ok());
        let err = EventStore::default().require_events("totals").unwrap_err();
        assert_eq!(err.to_string(), "Empty dataset: totals");
    }

    #[test]
    fn test_clones_share_events() {
        let store = store();
        let clone = store.clone();
        assert!(std::ptr::eq(store.events(), clone.events()));
    }
}
