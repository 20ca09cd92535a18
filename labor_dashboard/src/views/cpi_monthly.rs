//! Trailing-twelve-month national CPI with month-over-month changes.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use labor_timeseries::join::{AnnotatedObservation, attach_percentages};
use labor_timeseries::models::{LongSeries, Observation, WideTable};
use labor_timeseries::percent::percentage_changes;
use labor_timeseries::reshape::{DuplicatePolicy, combine, wide_from_category};

use crate::charts;
use crate::errors::ViewError;
use crate::queries::{self, GEO_USA, cpi_variable};
use crate::warehouse::QueryExecutor;

/// Headline categories in display order: (column label, monthly variable).
pub const CATEGORIES: [(&str, &str); 4] = [
    ("ALL ITEMS", cpi_variable::ALL_ITEMS_MONTHLY),
    ("FOOD", cpi_variable::FOOD_MONTHLY),
    ("ENERGY", cpi_variable::ENERGY_MONTHLY),
    (
        "ALL ITEMS LESS FOOD AND ENERGY",
        cpi_variable::CORE_MONTHLY,
    ),
];

/// Render-ready monthly CPI data.
#[derive(Debug, Clone)]
pub struct CpiMonthlyView {
    /// Index values, one column per category, one row per month.
    pub table: WideTable,
    /// Month-over-month percentage changes per category.
    pub percentages: WideTable,
    /// The long rows with percentages attached, in fetch order, for the
    /// grouped bar charts.
    pub rows: Vec<AnnotatedObservation>,
    /// Bar chart of index values by month, grouped by product.
    pub value_chart: Value,
    /// Bar chart of percentage changes by month, grouped by product.
    pub percentage_chart: Value,
}

/// First day of the month 13 months before `latest`, so the window holds a
/// full thirteen month-starts and every one of the trailing twelve months
/// gets a defined month-over-month change.
pub fn window_start(latest: NaiveDate) -> NaiveDate {
    let (year, month) = if latest.month() == 1 {
        (latest.year() - 2, 12)
    } else {
        (latest.year() - 1, latest.month() - 1)
    };
    // Day 1 of a valid (year, month) always exists.
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month")
}

/// Builds the monthly CPI view over the trailing twelve months of data.
pub fn build(exec: &mut dyn QueryExecutor) -> Result<CpiMonthlyView, ViewError> {
    let latest = queries::fetch_max_employment_date(exec)?.ok_or(ViewError::NoData)?;
    let records = queries::fetch_cpi_monthly(exec, window_start(latest))?;
    tracing::debug!(rows = records.len(), %latest, "fetched monthly CPI");

    // National series only; other geographies are discarded here rather
    // than in SQL so the same cached result can serve geo breakdowns.
    let national: Vec<_> = records.into_iter().filter(|r| r.geo_id == GEO_USA).collect();

    let by_variable = LongSeries::new(
        national
            .iter()
            .map(|r| Observation::new(r.variable.clone(), r.month, r.value))
            .collect(),
    );
    let table = combine(CATEGORIES.iter().map(|(column, variable)| {
        wide_from_category(&by_variable, variable, column, DuplicatePolicy::LastWriteWins)
    }));
    let percentages = percentage_changes(&table);

    let by_product = LongSeries::new(
        national
            .iter()
            .map(|r| Observation::new(r.product.clone(), r.month, r.value))
            .collect(),
    );
    let rows = attach_percentages(&by_product, &percentages)?;

    Ok(CpiMonthlyView {
        table,
        percentages,
        rows,
        value_chart: charts::grouped_bar("MONTH", "VALUE", "PRODUCT"),
        percentage_chart: charts::grouped_bar("MONTH", "PERCENTAGE", "PRODUCT"),
    })
}
