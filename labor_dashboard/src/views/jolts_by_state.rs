//! JOLTS measures compared across states for one selected year.

use serde_json::Value;

use labor_timeseries::pivot::{
    CrossSection, derive_other_separations, measure, pivot_by_geography,
};

use crate::charts;
use crate::errors::ViewError;
use crate::queries;
use crate::warehouse::QueryExecutor;

/// Choropleth order, as the page lays the maps out.
pub const CHART_MEASURES: [&str; 5] = [
    measure::HIRES,
    measure::JOB_OPENINGS,
    measure::OTHER_SEPARATIONS,
    measure::LAYOFFS_AND_DISCHARGES,
    measure::QUITS,
];

/// Render-ready state-level JOLTS data for one year.
#[derive(Debug, Clone)]
pub struct JoltsByStateView {
    /// The selected year.
    pub year: i32,
    /// One row per state, one column per measure, residual included.
    pub table: CrossSection,
    /// (measure, choropleth spec) pairs in display order.
    pub charts: Vec<(String, Value)>,
}

/// Years with any state-level data, ascending, for the year selector.
pub fn available_years(exec: &mut dyn QueryExecutor) -> Result<Vec<i32>, ViewError> {
    let records = queries::fetch_jolts_state(exec)?;
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    Ok(years)
}

/// Builds the by-state view for one selected year.
pub fn build(exec: &mut dyn QueryExecutor, year: i32) -> Result<JoltsByStateView, ViewError> {
    let records = queries::fetch_jolts_state(exec)?;
    tracing::debug!(rows = records.len(), year, "fetched state JOLTS");

    let rows: Vec<_> = records
        .into_iter()
        .filter(|r| r.year == year)
        .map(|r| r.row)
        .collect();
    let table = derive_other_separations(&pivot_by_geography(&rows));

    let charts = CHART_MEASURES
        .iter()
        .map(|m| (m.to_string(), charts::state_choropleth(m)))
        .collect();

    Ok(JoltsByStateView { year, table, charts })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::warehouse::{FixtureExecutor, Row, SqlValue};

    fn state_row(id: &str, name: &str, m: &str, date: &str, value: f64) -> Row {
        Row::from_pairs([
            ("VARIABLE", SqlValue::Text("v".into())),
            ("VALUE", SqlValue::Float(value)),
            ("DATE", SqlValue::Text(date.into())),
            ("MEASURE", SqlValue::Text(m.into())),
            ("INDUSTRY", SqlValue::Text("Total nonfarm".into())),
            ("ID", SqlValue::Text(id.into())),
            ("GEO_NAME", SqlValue::Text(name.into())),
        ])
    }

    fn fixture() -> FixtureExecutor {
        FixtureExecutor::new().with_dataset(
            queries::dataset::JOLTS_STATE,
            vec![
                state_row("geography/48", "Texas", measure::TOTAL_SEPARATIONS, "2021-06-01", 100.0),
                state_row("geography/48", "Texas", measure::QUITS, "2021-06-01", 40.0),
                state_row(
                    "geography/48",
                    "Texas",
                    measure::LAYOFFS_AND_DISCHARGES,
                    "2021-06-01",
                    20.0,
                ),
                state_row("geography/48", "Texas", measure::HIRES, "2020-06-01", 80.0),
            ],
        )
    }

    #[test]
    fn filters_to_the_selected_year_and_derives_the_residual() {
        let mut exec = fixture();
        let view = build(&mut exec, 2021).unwrap();
        assert_eq!(view.table.get(48, measure::OTHER_SEPARATIONS), Some(40.0));
        // The 2020 hires row is a different year and must not leak in.
        assert_eq!(view.table.get(48, measure::HIRES), None);
    }

    #[test]
    fn lists_available_years_ascending() {
        let mut exec = fixture();
        assert_eq!(available_years(&mut exec).unwrap(), [2020, 2021]);
    }

    #[test]
    fn emits_one_choropleth_per_measure() {
        let mut exec = fixture();
        let view = build(&mut exec, 2021).unwrap();
        assert_eq!(view.charts.len(), CHART_MEASURES.len());
        assert_eq!(view.charts[0].0, measure::HIRES);
    }
}
