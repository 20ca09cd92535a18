//! National annual JOLTS levels, summed across industries.

use serde_json::Value;

use labor_timeseries::models::WideTable;
use labor_timeseries::pivot::measure;
use labor_timeseries::reshape::{DuplicatePolicy, combine, wide_from_category};

use crate::charts;
use crate::errors::ViewError;
use crate::queries;
use crate::warehouse::QueryExecutor;

/// Measures in display order: (column label, warehouse measure label).
pub const MEASURES: [(&str, &str); 5] = [
    ("JOB OPENINGS", measure::JOB_OPENINGS),
    ("HIRES", measure::HIRES),
    ("QUITS", measure::QUITS),
    ("LAYOFFS", measure::LAYOFFS_AND_DISCHARGES),
    ("OTHER SEPARATIONS", measure::OTHER_SEPARATIONS),
];

/// Render-ready national JOLTS data.
#[derive(Debug, Clone)]
pub struct JoltsNationalView {
    /// Annual totals, one column per measure.
    pub table: WideTable,
    /// Line chart over years, one series per measure.
    pub chart: Value,
}

/// Builds the national JOLTS view. The warehouse returns one row per
/// (measure, industry, year); industries are collapsed into annual totals
/// with the `Sum` duplicate policy.
pub fn build(exec: &mut dyn QueryExecutor) -> Result<JoltsNationalView, ViewError> {
    let series = queries::fetch_jolts_national(exec)?;
    tracing::debug!(observations = series.len(), "fetched national JOLTS");

    let table = combine(MEASURES.iter().map(|(column, label)| {
        wide_from_category(&series, label, column, DuplicatePolicy::Sum)
    }));

    Ok(JoltsNationalView {
        chart: charts::period_line("YEAR", "VALUE", "MEASURE"),
        table,
    })
}
