//! Monthly metro-area employment for selected industries.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::charts;
use crate::errors::ViewError;
use crate::queries::{self, MetroEmploymentRecord};
use crate::warehouse::QueryExecutor;

/// One expandable per selected metro area.
#[derive(Debug, Clone)]
pub struct AreaEmployment {
    /// Metro-area name.
    pub area: String,
    /// This area's rows in fetch order, for the chart and data tab.
    pub rows: Vec<MetroEmploymentRecord>,
    /// Grouped bar chart of employee counts by month and industry.
    pub chart: Value,
}

/// Render-ready state/metro employment data.
#[derive(Debug, Clone)]
pub struct StateMetroView {
    /// One entry per selected area, in selection order.
    pub areas: Vec<AreaEmployment>,
}

/// The industry options for the multi-select.
pub fn industries(exec: &mut dyn QueryExecutor) -> Result<Vec<String>, ViewError> {
    Ok(queries::fetch_industries(exec)?)
}

/// The metro-area options for the multi-select.
pub fn metro_areas(exec: &mut dyn QueryExecutor) -> Result<Vec<String>, ViewError> {
    Ok(queries::fetch_metro_areas(exec)?)
}

/// First of the month one year before `today`, the start of the window the
/// page charts.
pub fn window_start(today: NaiveDate) -> NaiveDate {
    // Day 1 of a valid (year, month) always exists.
    NaiveDate::from_ymd_opt(today.year() - 1, today.month(), 1).expect("first of month")
}

/// Builds the view for the selected industries and areas.
///
/// An empty selection on either axis short-circuits with
/// [`ViewError::EmptySelection`] before any query runs.
pub fn build(
    exec: &mut dyn QueryExecutor,
    selected_industries: &[String],
    selected_areas: &[String],
    today: NaiveDate,
) -> Result<StateMetroView, ViewError> {
    if selected_industries.is_empty() {
        return Err(ViewError::EmptySelection("industries"));
    }
    if selected_areas.is_empty() {
        return Err(ViewError::EmptySelection("metro areas"));
    }

    let records =
        queries::fetch_metro_employment(exec, selected_industries, window_start(today))?;
    tracing::debug!(rows = records.len(), "fetched metro employment");

    let areas = selected_areas
        .iter()
        .map(|area| AreaEmployment {
            area: area.clone(),
            rows: records.iter().filter(|r| &r.area == area).cloned().collect(),
            chart: charts::grouped_bar("MONTH", "VALUE", "INDUSTRY"),
        })
        .collect();

    Ok(StateMetroView { areas })
}
