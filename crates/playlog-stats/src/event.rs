//! Play events and their calendar-derived fields.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use playlog_common::{weekday_abbreviation, PlaylogError, Result, YearMonth};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest single play accepted, one day in milliseconds.
///
/// Bounding each play keeps every `u64` listening-time sum over an in-memory
/// store far from overflow.
pub const MAX_MS_PLAYED: u64 = 24 * 60 * 60 * 1000;

/// Day of the week with a fixed Monday-based ordinal (Monday = 0, Sunday = 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    /// Monday through Sunday, in ordinal order.
    pub const ALL: [Self; 7] = [Self(0), Self(1), Self(2), Self(3), Self(4), Self(5), Self(6)];

    /// Builds the ordinal for a chrono weekday.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_monday() as u8)
    }

    /// Day of week of a calendar date.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_weekday(date.weekday())
    }

    /// Monday-based ordinal, 0-6.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Saturday and Sunday.
    pub const fn is_weekend(self) -> bool {
        self.0 >= 5
    }

    /// Three-letter label (`Mon` .. `Sun`).
    pub fn abbreviation(self) -> &'static str {
        weekday_abbreviation(self.0)
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Weekday/weekend split key. Weekdays sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    /// Monday through Friday
    Weekday,
    /// Saturday and Sunday
    Weekend,
}

impl From<DayOfWeek> for DayType {
    fn from(day: DayOfWeek) -> Self {
        if day.is_weekend() {
            Self::Weekend
        } else {
            Self::Weekday
        }
    }
}

/// One logged playback of a track.
///
/// Calendar fields are derived once at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    artist: String,
    track: String,
    end_time: NaiveDateTime,
    ms_played: u64,
    date: NaiveDate,
    hour: u32,
    day_of_week: DayOfWeek,
    year_month: YearMonth,
}

impl PlayEvent {
    /// Creates an event.
    ///
    /// Rejects blank artist or track names, plays longer than
    /// [`MAX_MS_PLAYED`] and end times outside the supported years.
    pub fn new(
        artist: impl Into<String>,
        track: impl Into<String>,
        end_time: NaiveDateTime,
        ms_played: u64,
    ) -> Result<Self> {
        let artist = artist.into();
        let track = track.into();

        if artist.trim().is_empty() {
            return Err(PlaylogError::invalid_argument("artist", "cannot be empty"));
        }
        if track.trim().is_empty() {
            return Err(PlaylogError::invalid_argument("track", "cannot be empty"));
        }

        if ms_played > MAX_MS_PLAYED {
            return Err(PlaylogError::invalid_argument(
                "ms_played",
                format!("{ms_played} exceeds the {MAX_MS_PLAYED} ms limit for one play"),
            ));
        }

        let date = end_time.date();
        let year_month = YearMonth::of(date)?;
        Ok(Self {
            artist,
            track,
            end_time,
            ms_played,
            date,
            hour: end_time.hour(),
            day_of_week: DayOfWeek::of(date),
            year_month,
        })
    }

    /// Artist name.
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// Track name; unique only together with the artist.
    pub fn track(&self) -> &str {
        &self.track
    }

    /// When playback ended, in the reporting time zone.
    pub const fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    /// Playback duration in milliseconds.
    pub const fn ms_played(&self) -> u64 {
        self.ms_played
    }

    /// Calendar date of `end_time`.
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Hour of day of `end_time`, 0-23.
    pub const fn hour(&self) -> u32 {
        self.hour
    }

    /// Day of week of `end_time`.
    pub const fn day_of_week(&self) -> DayOfWeek {
        self.day_of_week
    }

    /// Whether the play ended on a Saturday or Sunday.
    pub const fn is_weekend(&self) -> bool {
        self.day_of_week.is_weekend()
    }

    /// Calendar year of `end_time`.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of `end_time`, 1-12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Year and month of `end_time`.
    pub const fn year_month(&self) -> YearMonth {
        self.year_month
    }
}
