//! Dashboard report assembly: titled, unit-converted series per selection.

use crate::engine::{AggregationEngine, DataPoint, TrackKey};
use crate::event::{DayOfWeek, DayType};
use crate::store::EventStore;
use playlog_common::{
    month_abbreviation, ms_f64_to_hours, ms_to_minutes, truncate_label, Result, Selection, YearMonth,
};
use serde::Serialize;
use tracing::{info, instrument};

/// Longest axis label, in characters.
pub const MAX_LABEL_CHARS: usize = 20;

const MINUTES_AXIS: &str = "Total listening time (minutes)";
const AVERAGE_HOURS_AXIS: &str = "Average listening time (hours)";

/// A labelled, unit-converted data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint<K> {
    /// Grouping key
    pub key: K,
    /// Display label for the key
    pub label: String,
    /// Value in the series' unit
    pub value: f64,
}

/// One chart's worth of data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries<K> {
    /// Chart title
    pub title: String,
    /// Value axis caption, including the unit
    pub value_axis: String,
    /// Points in display order
    pub points: Vec<ChartPoint<K>>,
}

impl<K> ChartSeries<K> {
    fn from_points<V, L, C>(
        title: impl Into<String>,
        value_axis: &str,
        points: Vec<DataPoint<K, V>>,
        label: L,
        convert: C,
    ) -> Self
    where
        L: Fn(&K) -> String,
        C: Fn(V) -> f64,
    {
        Self {
            title: title.into(),
            value_axis: value_axis.to_string(),
            points: points
                .into_iter()
                .map(|point| ChartPoint {
                    label: label(&point.key),
                    value: convert(point.value),
                    key: point.key,
                })
                .collect(),
        }
    }
}

/// One entry of the month picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    /// Display label, such as `January 2024`
    pub label: String,
    /// Selection value, such as `2024 01`
    pub value: String,
}

/// The picker entries: "all data" first, then every observed month chronologically.
pub fn month_options(store: &EventStore) -> Vec<MonthOption> {
    std::iter::once(MonthOption {
        label: "Select all data".to_string(),
        value: Selection::ALL_VALUE.to_string(),
    })
    .chain(store.months().into_iter().map(|ym| MonthOption {
        label: ym.label(),
        value: ym.selection_value(),
    }))
    .collect()
}

/// Everything a dashboard needs to draw one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Which slice of the history this report covers
    pub selection: Selection,
    /// Month picker entries for the whole history
    pub month_options: Vec<MonthOption>,
    /// Most played artists
    pub top_artists: ChartSeries<String>,
    /// Most played tracks
    pub top_tracks: ChartSeries<TrackKey>,
    /// Average listening time per day of week
    pub day_of_week: ChartSeries<DayOfWeek>,
    /// Listening time per month (all-data reports only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly: Option<ChartSeries<YearMonth>>,
    /// Average listening time per hour of day (all-data reports only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_of_day: Option<ChartSeries<u32>>,
    /// Weekday versus weekend listening time (all-data reports only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_type: Option<ChartSeries<DayType>>,
}

/// Builds [`DashboardReport`]s with a fixed top-n size.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder {
    top_n: usize,
}

impl ReportBuilder {
    /// Builder producing top-`top_n` rankings.
    pub const fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Report for `selection` over `store`.
    ///
    /// A month selection fails with `EmptyDataset` when that month has no plays.
    #[instrument(skip(self, store), fields(events = store.len(), top_n = self.top_n))]
    pub fn build(&self, store: &EventStore, selection: Selection) -> Result<DashboardReport> {
        let report = match selection {
            Selection::All => self.build_all(store)?,
            Selection::Month(year_month) => self.build_month(store, year_month)?,
        };

        info!(%selection, "Built dashboard report");
        Ok(report)
    }

    fn build_all(&self, store: &EventStore) -> Result<DashboardReport> {
        let engine = AggregationEngine::new(store);
        let n = self.top_n;

        Ok(DashboardReport {
            selection: Selection::All,
            month_options: month_options(store),
            top_artists: self.top_artists(&engine, format!("Top {n} Most Played Artists"))?,
            top_tracks: self.top_tracks(&engine, format!("Top {n} Most Played Songs"))?,
            day_of_week: day_of_week(&engine, "Average Listening Time by Day of Week".to_string())?,
            monthly: Some(ChartSeries::from_points(
                "Monthly Listening Time",
                MINUTES_AXIS,
                engine.totals_by_month()?,
                |ym| format!("{} {}", month_abbreviation(ym.month()), ym.year()),
                ms_to_minutes,
            )),
            hour_of_day: Some(ChartSeries::from_points(
                "Average Listening Time by Hour of Day",
                AVERAGE_HOURS_AXIS,
                engine.average_by_hour()?,
                |hour| format!("{hour:02}:00"),
                ms_f64_to_hours,
            )),
            day_type: Some(ChartSeries::from_points(
                "Weekday vs Weekend Listening Time",
                MINUTES_AXIS,
                engine.total_by_day_type()?,
                |day_type| match day_type {
                    DayType::Weekday => "Weekday".to_string(),
                    DayType::Weekend => "Weekend".to_string(),
                },
                ms_to_minutes,
            )),
        })
    }

    fn build_month(&self, store: &EventStore, year_month: YearMonth) -> Result<DashboardReport> {
        let month_store = store.filter_by_year_month(year_month)?;
        let engine = AggregationEngine::new(&month_store);
        let n = self.top_n;
        let month = year_month.label();

        Ok(DashboardReport {
            selection: Selection::Month(year_month),
            month_options: month_options(store),
            top_artists: self.top_artists(&engine, format!("Top {n} Artists of {month}"))?,
            top_tracks: self.top_tracks(&engine, format!("Top {n} Songs of {month}"))?,
            day_of_week: day_of_week(&engine, format!("Average Listening Time by Day of Week on {month}"))?,
            monthly: None,
            hour_of_day: None,
            day_type: None,
        })
    }

    fn top_artists(&self, engine: &AggregationEngine<'_>, title: String) -> Result<ChartSeries<String>> {
        Ok(ChartSeries::from_points(
            title,
            MINUTES_AXIS,
            engine.top_artists(self.top_n)?,
            |artist| truncate_label(artist, MAX_LABEL_CHARS),
            ms_to_minutes,
        ))
    }

    fn top_tracks(&self, engine: &AggregationEngine<'_>, title: String) -> Result<ChartSeries<TrackKey>> {
        Ok(ChartSeries::from_points(
            title,
            MINUTES_AXIS,
            engine.top_tracks(self.top_n)?,
            |key| {
                format!(
                    "{} by {}",
                    truncate_label(&key.track, MAX_LABEL_CHARS),
                    truncate_label(&key.artist, MAX_LABEL_CHARS)
                )
            },
            ms_to_minutes,
        ))
    }
}

fn day_of_week(engine: &AggregationEngine<'_>, title: String) -> Result<ChartSeries<DayOfWeek>> {
    Ok(ChartSeries::from_points(
        title,
        AVERAGE_HOURS_AXIS,
        engine.average_by_day_of_week()?,
        |day| day.abbreviation().to_string(),
        ms_f64_to_hours,
    ))
}
