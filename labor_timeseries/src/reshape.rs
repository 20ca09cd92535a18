//! Long-to-wide reshaping.
//!
//! Each dashboard view builds one single-column [`WideTable`] per category,
//! then folds them together with an outer join so no period is dropped just
//! because one category has no data there.

use crate::models::{LongSeries, WideTable};

/// How to resolve duplicate observations for the same (category, period).
///
/// The warehouse occasionally hands back more than one row per cell: either
/// genuine duplicates (resolved by [`DuplicatePolicy::LastWriteWins`], the
/// default) or per-industry breakdowns that a national view wants collapsed
/// into a total ([`DuplicatePolicy::Sum`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the last observation in series order.
    #[default]
    LastWriteWins,
    /// Accumulate all observations for the cell.
    Sum,
}

/// Builds a single-column wide table from the observations whose category
/// matches `category` exactly, naming the value column `column`.
///
/// A category with zero matching observations yields a table with the column
/// registered but no rows.
pub fn wide_from_category(
    series: &LongSeries,
    category: &str,
    column: &str,
    policy: DuplicatePolicy,
) -> WideTable {
    let mut out = WideTable::new();
    out.add_column(column);
    for obs in series.rows().iter().filter(|o| o.category == category) {
        let value = match policy {
            DuplicatePolicy::LastWriteWins => obs.value,
            DuplicatePolicy::Sum => out.get(obs.period, column).unwrap_or(0.0) + obs.value,
        };
        out.insert(obs.period, column, value);
    }
    out
}

/// Folds single-category tables into one multi-category table via repeated
/// outer joins. Column order follows the input order; the period index is
/// the union of every input's periods.
pub fn combine(tables: impl IntoIterator<Item = WideTable>) -> WideTable {
    tables
        .into_iter()
        .fold(WideTable::new(), |acc, t| acc.outer_join(&t))
}
