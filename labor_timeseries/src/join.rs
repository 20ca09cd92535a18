//! Joining derived percentages back onto the long-format rows.

use serde::Serialize;
use thiserror::Error;

use crate::models::{LongSeries, Period, WideTable};
use crate::percent::PERCENTAGE_SUFFIX;

/// The joiner could not resolve a category label against the percentage
/// table's columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    /// No percentage column exists for this category label.
    #[error("no percentage column {column:?} for category {category:?}")]
    UnknownColumn {
        /// The offending long-format category label.
        category: String,
        /// The column name the label normalized to.
        column: String,
    },
}

/// An observation annotated with its period-over-period percentage change.
///
/// `percentage` is `None` for the first period of the table it was resolved
/// against (no prior period exists) and wherever an operand was missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedObservation {
    /// Category label carried over from the source row.
    pub category: String,
    /// Period carried over from the source row.
    pub period: Period,
    /// Observed value carried over from the source row.
    pub value: f64,
    /// Percentage change looked up at (period, normalized category).
    pub percentage: Option<f64>,
}

/// Normalizes a long-format category label to its percentage column name:
/// uppercased, with the fixed suffix appended.
pub fn lookup_column(category: &str) -> String {
    format!("{}{PERCENTAGE_SUFFIX}", category.to_uppercase())
}

/// Attaches percentage-change values onto every observation of `series`.
///
/// Row order is preserved and no row is filtered out. A label that does not
/// normalize to a column of `percentages` is an explicit
/// [`JoinError::UnknownColumn`] rather than a silently wrong value; a missing
/// cell (the first period, by construction) yields `percentage: None`.
/// Joining the same inputs twice attaches identical values.
pub fn attach_percentages(
    series: &LongSeries,
    percentages: &WideTable,
) -> Result<Vec<AnnotatedObservation>, JoinError> {
    series
        .rows()
        .iter()
        .map(|obs| {
            let column = lookup_column(&obs.category);
            if !percentages.has_column(&column) {
                return Err(JoinError::UnknownColumn {
                    category: obs.category.clone(),
                    column,
                });
            }
            Ok(AnnotatedObservation {
                category: obs.category.clone(),
                period: obs.period,
                value: obs.value,
                percentage: percentages.get(obs.period, &column),
            })
        })
        .collect()
}
