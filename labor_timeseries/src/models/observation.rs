//! Long-format observations as fetched from the warehouse.

use serde::{Deserialize, Serialize};

use crate::models::period::Period;

/// A single long-format data point: one value for one category at one period.
///
/// This is the source of truth for every derived table and is never mutated
/// after it has been decoded from a query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Category identifier (a warehouse variable id or a measure label).
    pub category: String,
    /// The calendar period this value belongs to.
    pub period: Period,
    /// The observed value.
    pub value: f64,
}

impl Observation {
    /// Convenience constructor.
    pub fn new(category: impl Into<String>, period: Period, value: f64) -> Self {
        Self {
            category: category.into(),
            period,
            value,
        }
    }
}

/// An ordered collection of observations, possibly spanning several
/// categories with unaligned periods (missing data is allowed).
///
/// Construction sorts by period with a stable sort, so rows sharing a period
/// keep their fetch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongSeries {
    rows: Vec<Observation>,
}

impl LongSeries {
    /// Builds a series from unordered observations, sorting by period.
    pub fn new(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|obs| obs.period);
        Self { rows }
    }

    /// The observations, ascending by period.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The earliest period present, if any.
    pub fn first_period(&self) -> Option<Period> {
        self.rows.first().map(|obs| obs.period)
    }
}

impl FromIterator<Observation> for LongSeries {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
