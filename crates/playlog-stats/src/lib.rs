//! # Playlog Stats
//!
//! Listening statistics over streaming history exports.
//!
//! Play events are loaded into an immutable [`EventStore`]. The
//! [`AggregationEngine`] computes totals, rankings and averages, where
//! averages run over gap-filled calendar buckets so silent days and hours
//! count as zero. [`ReportBuilder`] shapes those results into titled chart
//! series for a dashboard.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod calendar;
pub mod engine;
pub mod event;
pub mod gap_fill;
pub mod ingest;
pub mod report;
pub mod store;

pub use calendar::{CalendarRange, DateHour, Daily, Granularity, Hourly};
pub use engine::{AggregationEngine, DataPoint, TrackKey};
pub use event::{DayOfWeek, DayType, PlayEvent, MAX_MS_PLAYED};
pub use gap_fill::{day_buckets, hour_buckets, Bucket, DayBucket, HourBucket};
pub use ingest::{load_documents, load_files, parse_document, Document};
pub use report::{month_options, ChartPoint, ChartSeries, DashboardReport, MonthOption, ReportBuilder};
pub use store::EventStore;
