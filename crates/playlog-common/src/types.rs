//! Common type definitions and newtype wrappers for domain modeling.

use crate::error::{PlaylogError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest year accepted by month selection.
pub const MIN_YEAR: i32 = 1970;

/// Latest year accepted by month selection.
pub const MAX_YEAR: i32 = 9999;

/// A calendar month of a specific year.
///
/// Ordering is chronological: by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a year/month pair, rejecting months outside 1-12 and
    /// years outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PlaylogError::invalid_argument(
                "month",
                format!("{month} is outside 1-12"),
            ));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(PlaylogError::invalid_argument(
                "year",
                format!("{year} is outside {MIN_YEAR}-{MAX_YEAR}"),
            ));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`, subject to the same year bounds as [`new`](Self::new).
    pub fn of(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    /// Calendar year.
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1 = January.
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Long label such as `January 2024`.
    pub fn label(self) -> String {
        format!("{} {}", crate::utils::month_name(self.month), self.year)
    }

    /// Value used to select this month, such as `2024 01`.
    pub fn selection_value(self) -> String {
        format!("{:04} {:02}", self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = PlaylogError;

    /// Accepts `YYYY MM` and `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PlaylogError::invalid_argument("month", format!("cannot parse `{s}` as YYYY MM"));

        let mut parts = s.trim().split(|c: char| c == ' ' || c == '-').filter(|p| !p.is_empty());
        let (Some(year), Some(month), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Which slice of the history a dashboard report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selection {
    /// Every loaded event
    #[default]
    All,
    /// Only events from one calendar month
    Month(YearMonth),
}

impl Selection {
    /// Selection value used by the "all data" option.
    pub const ALL_VALUE: &'static str = "all";
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_VALUE),
            Self::Month(ym) => f.write_str(&ym.selection_value()),
        }
    }
}

impl FromStr for Selection {
    type Err = PlaylogError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_VALUE) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Month)
        }
    }
}

impl TryFrom<String> for Selection {
    type Error = PlaylogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        selection.to_string()
    }
}
