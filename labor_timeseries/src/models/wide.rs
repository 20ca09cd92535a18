//! The period-indexed wide table behind every chart and data panel.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use indexmap::{IndexMap, IndexSet};

use crate::models::period::Period;

/// A sparse table with one row per period and one column per category.
///
/// Invariant: at most one value per (period, column) pair. Inserting into an
/// occupied cell overwrites it (last write wins); callers that want a
/// different duplicate policy resolve it before inserting (see
/// [`crate::reshape`]).
///
/// Columns keep their insertion order; rows are kept sorted by period.
/// Absent (period, column) combinations are simply missing cells, never a
/// placeholder value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    columns: IndexSet<String>,
    rows: BTreeMap<Period, IndexMap<String, f64>>,
}

impl WideTable {
    /// An empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a column without inserting any cell.
    ///
    /// Used so a category with zero observations still shows up as an empty
    /// column rather than disappearing from the schema.
    pub fn add_column(&mut self, name: impl Into<String>) {
        self.columns.insert(name.into());
    }

    /// Sets the cell at (period, column), registering the column if needed.
    /// Overwrites any existing value.
    pub fn insert(&mut self, period: Period, column: &str, value: f64) {
        if !self.columns.contains(column) {
            self.columns.insert(column.to_string());
        }
        self.rows
            .entry(period)
            .or_default()
            .insert(column.to_string(), value);
    }

    /// The cell at (period, column), if present.
    pub fn get(&self, period: Period, column: &str) -> Option<f64> {
        self.rows.get(&period)?.get(column).copied()
    }

    /// True if the column is part of the schema (it may still be empty).
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains(column)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Periods ascending.
    pub fn periods(&self) -> impl Iterator<Item = Period> + '_ {
        self.rows.keys().copied()
    }

    /// Number of period rows.
    pub fn period_count(&self) -> usize {
        self.rows.len()
    }

    /// The earliest period with any cell.
    pub fn first_period(&self) -> Option<Period> {
        self.rows.keys().next().copied()
    }

    /// The latest period with any cell.
    pub fn last_period(&self) -> Option<Period> {
        self.rows.keys().next_back().copied()
    }

    /// True if the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Outer join on the period index: the result covers every period present
    /// on either side and appends `other`'s columns after `self`'s. A period
    /// one side lacks is kept with missing cells on that side.
    pub fn outer_join(&self, other: &WideTable) -> WideTable {
        let mut out = self.clone();
        for column in other.columns() {
            out.add_column(column);
        }
        for (period, cells) in &other.rows {
            for (column, value) in cells {
                out.insert(*period, column, *value);
            }
        }
        out
    }

    /// A new table restricted to periods inside the inclusive range. Columns
    /// are kept even when the restriction empties them. A reversed range
    /// (start after end) selects nothing.
    pub fn restrict_periods(&self, range: RangeInclusive<Period>) -> WideTable {
        let mut out = WideTable::new();
        for column in self.columns() {
            out.add_column(column);
        }
        // BTreeMap::range asserts start <= end; an inverted selection is an
        // empty one, not a fault.
        if range.start() > range.end() {
            return out;
        }
        for (period, cells) in self.rows.range(range) {
            for (column, value) in cells {
                out.insert(*period, column, *value);
            }
        }
        out
    }
}
