//! Calendar periods used as the row index of every derived table.
//!
//! A period is either a calendar year (annual series) or a `YYYY-MM` month
//! token (monthly series). A single table always carries one unit; the
//! chronological `Ord` is only meaningful within that unit.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A period token failed to parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    /// The token is neither a `YYYY` year nor a `YYYY-MM` month.
    #[error("invalid period token: {0:?}")]
    InvalidToken(String),

    /// The month component is outside 1..=12.
    #[error("month out of range in period token: {0:?}")]
    MonthOutOfRange(String),
}

/// Granularity of a period index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodUnit {
    /// Calendar years.
    Year,
    /// Calendar months.
    Month,
}

/// A calendar year or month, the unique row index of a [`super::WideTable`].
///
/// Renders as `"2021"` or `"2021-07"` and round-trips through serde as that
/// string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    /// A calendar year, e.g. `2021`.
    Year(i32),
    /// A calendar month, e.g. `2021-07`.
    Month {
        /// Calendar year component.
        year: i32,
        /// Month component, 1..=12.
        month: u32,
    },
}

impl Period {
    /// Truncates a calendar date to a period of the given unit.
    pub fn from_date(date: NaiveDate, unit: PeriodUnit) -> Self {
        match unit {
            PeriodUnit::Year => Period::Year(date.year()),
            PeriodUnit::Month => Period::Month {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    /// The unit this period belongs to.
    pub fn unit(&self) -> PeriodUnit {
        match self {
            Period::Year(_) => PeriodUnit::Year,
            Period::Month { .. } => PeriodUnit::Month,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{year}"),
            Period::Month { year, month } => write!(f, "{year:04}-{month:02}"),
        }
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            None => s
                .parse::<i32>()
                .map(Period::Year)
                .map_err(|_| PeriodError::InvalidToken(s.to_string())),
            Some((year, month)) => {
                let year = year
                    .parse::<i32>()
                    .map_err(|_| PeriodError::InvalidToken(s.to_string()))?;
                let month = month
                    .parse::<u32>()
                    .map_err(|_| PeriodError::InvalidToken(s.to_string()))?;
                if !(1..=12).contains(&month) {
                    return Err(PeriodError::MonthOutOfRange(s.to_string()));
                }
                Ok(Period::Month { year, month })
            }
        }
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
