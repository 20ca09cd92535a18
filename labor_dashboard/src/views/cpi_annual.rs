//! Annual national CPI, one line per headline category.

use serde_json::Value;

use labor_timeseries::models::{Period, WideTable};
use labor_timeseries::reshape::{DuplicatePolicy, combine, wide_from_category};

use crate::charts;
use crate::errors::ViewError;
use crate::queries::{self, cpi_variable};
use crate::warehouse::QueryExecutor;

/// Headline categories in display order: (column label, warehouse variable).
pub const CATEGORIES: [(&str, &str); 4] = [
    ("ALL ITEMS", cpi_variable::ALL_ITEMS_ANNUAL),
    ("FOOD", cpi_variable::FOOD_ANNUAL),
    ("ENERGY", cpi_variable::ENERGY_ANNUAL),
    (
        "ALL ITEMS LESS FOOD AND ENERGY",
        cpi_variable::CORE_ANNUAL,
    ),
];

/// Years shown when the user has not picked a range yet.
pub const DEFAULT_SPAN_YEARS: i32 = 20;

/// Render-ready annual CPI data.
#[derive(Debug, Clone)]
pub struct CpiAnnualView {
    /// One column per headline category, restricted to the selected years.
    pub table: WideTable,
    /// Line chart over the selected years.
    pub chart: Value,
}

/// Builds the annual CPI view, clamped to the selected inclusive year range
/// (defaulting to the latest [`DEFAULT_SPAN_YEARS`] years of data).
pub fn build(
    exec: &mut dyn QueryExecutor,
    selected_years: Option<(i32, i32)>,
) -> Result<CpiAnnualView, ViewError> {
    let series = queries::fetch_cpi_annual(exec)?;
    tracing::debug!(observations = series.len(), "fetched annual CPI");

    let table = combine(CATEGORIES.iter().map(|(column, variable)| {
        wide_from_category(&series, variable, column, DuplicatePolicy::LastWriteWins)
    }));

    let (start, end) = match (selected_years, table.last_period()) {
        (Some(range), _) => range,
        (None, Some(Period::Year(latest))) => (latest - DEFAULT_SPAN_YEARS, latest),
        // No data at all: the empty table is its own answer.
        _ => (0, 0),
    };
    let table = if table.is_empty() {
        table
    } else {
        table.restrict_periods(Period::Year(start)..=Period::Year(end))
    };

    Ok(CpiAnnualView {
        chart: charts::period_line("YEAR", "VALUE", "CATEGORY"),
        table,
    })
}
