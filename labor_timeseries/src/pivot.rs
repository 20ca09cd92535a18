//! Geography-indexed pivot for single-period cross sections.
//!
//! The JOLTS state view compares measures across states for one selected
//! year: long rows keyed by (geography, measure) pivot into measure columns,
//! and the residual "Other separations" is derived from the separation
//! components when the warehouse did not supply it.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// JOLTS measure labels as they appear in the warehouse.
pub mod measure {
    /// All additions to the payroll during the month.
    pub const HIRES: &str = "Hires";
    /// Positions open on the last business day of the month.
    pub const JOB_OPENINGS: &str = "Job openings";
    /// Involuntary separations initiated by the employer.
    pub const LAYOFFS_AND_DISCHARGES: &str = "Layoffs and discharges";
    /// Employees who left voluntarily.
    pub const QUITS: &str = "Quits";
    /// Quits + layoffs and discharges + other separations.
    pub const TOTAL_SEPARATIONS: &str = "Total separations";
    /// Retirements, transfers, deaths, disability separations.
    pub const OTHER_SEPARATIONS: &str = "Other separations";
}

/// One long-format row of a geographic cross section: a single measure value
/// for a single geography within one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMeasureRow {
    /// Numeric geography identifier (e.g. a FIPS state code).
    pub geo_id: u32,
    /// Human-readable geography name.
    pub geo_name: String,
    /// Measure label, e.g. `"Hires"`.
    pub measure: String,
    /// Observed value.
    pub value: f64,
}

/// A pivoted cross section: one row per geography, one column per measure.
///
/// Rows sort by (geo_id, geo_name); measure columns keep first-seen order.
/// Cells are sparse and duplicates resolve last-write-wins, mirroring
/// [`crate::models::WideTable`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossSection {
    measures: IndexSet<String>,
    rows: BTreeMap<(u32, String), IndexMap<String, f64>>,
}

impl CrossSection {
    /// An empty cross section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cell for (geography, measure), registering the measure column
    /// if needed. Overwrites any existing value.
    pub fn insert(&mut self, geo_id: u32, geo_name: &str, measure: &str, value: f64) {
        if !self.measures.contains(measure) {
            self.measures.insert(measure.to_string());
        }
        self.rows
            .entry((geo_id, geo_name.to_string()))
            .or_default()
            .insert(measure.to_string(), value);
    }

    /// The cell for (geo_id, measure), searching by id alone.
    pub fn get(&self, geo_id: u32, measure: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|((id, _), _)| *id == geo_id)
            .and_then(|(_, cells)| cells.get(measure))
            .copied()
    }

    /// Measure column names in first-seen order.
    pub fn measures(&self) -> impl Iterator<Item = &str> {
        self.measures.iter().map(String::as_str)
    }

    /// True if the measure is part of the schema.
    pub fn has_measure(&self, measure: &str) -> bool {
        self.measures.contains(measure)
    }

    /// Geography keys ascending by (geo_id, geo_name).
    pub fn geographies(&self) -> impl Iterator<Item = (u32, &str)> {
        self.rows.keys().map(|(id, name)| (*id, name.as_str()))
    }

    /// Number of geography rows.
    pub fn geography_count(&self) -> usize {
        self.rows.len()
    }

    /// True if no geography has any cell.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cells(&self, geo_id: u32, geo_name: &str) -> Option<&IndexMap<String, f64>> {
        self.rows.get(&(geo_id, geo_name.to_string()))
    }
}

/// Pivots long rows for a single period into a [`CrossSection`].
pub fn pivot_by_geography(rows: &[GeoMeasureRow]) -> CrossSection {
    let mut out = CrossSection::new();
    for row in rows {
        out.insert(row.geo_id, &row.geo_name, &row.measure, row.value);
    }
    out
}

/// Adds the residual `Other separations` column:
/// `Total separations - Quits - Layoffs and discharges`.
///
/// A fetched `Other separations` value is preferred wherever it exists; the
/// residual only fills geographies without one. Geographies missing any of
/// the three inputs keep the cell absent. The input is not modified.
pub fn derive_other_separations(cross: &CrossSection) -> CrossSection {
    let mut out = cross.clone();
    for (geo_id, geo_name) in cross.geographies() {
        let cells = match cross.cells(geo_id, geo_name) {
            Some(cells) => cells,
            None => continue,
        };
        if cells.contains_key(measure::OTHER_SEPARATIONS) {
            continue;
        }
        let total = cells.get(measure::TOTAL_SEPARATIONS);
        let quits = cells.get(measure::QUITS);
        let layoffs = cells.get(measure::LAYOFFS_AND_DISCHARGES);
        if let (Some(total), Some(quits), Some(layoffs)) = (total, quits, layoffs) {
            out.insert(
                geo_id,
                geo_name,
                measure::OTHER_SEPARATIONS,
                total - quits - layoffs,
            );
        }
    }
    // The column must exist even when nothing could be derived, so the
    // table and choropleths keep a stable schema.
    if !out.has_measure(measure::OTHER_SEPARATIONS) {
        out.measures.insert(measure::OTHER_SEPARATIONS.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(geo_id: u32, geo_name: &str, m: &str, value: f64) -> GeoMeasureRow {
        GeoMeasureRow {
            geo_id,
            geo_name: geo_name.to_string(),
            measure: m.to_string(),
            value,
        }
    }

    #[test]
    fn pivots_measures_into_columns() {
        let cross = pivot_by_geography(&[
            row(48, "Texas", measure::HIRES, 120.0),
            row(48, "Texas", measure::QUITS, 40.0),
            row(36, "New York", measure::HIRES, 90.0),
        ]);
        assert_eq!(cross.geography_count(), 2);
        assert_eq!(cross.get(48, measure::HIRES), Some(120.0));
        assert_eq!(cross.get(36, measure::QUITS), None);
        let geos: Vec<u32> = cross.geographies().map(|(id, _)| id).collect();
        assert_eq!(geos, [36, 48]);
    }

    #[test]
    fn residual_is_total_minus_quits_minus_layoffs() {
        let cross = pivot_by_geography(&[
            row(48, "Texas", measure::TOTAL_SEPARATIONS, 100.0),
            row(48, "Texas", measure::QUITS, 40.0),
            row(48, "Texas", measure::LAYOFFS_AND_DISCHARGES, 20.0),
        ]);
        let derived = derive_other_separations(&cross);
        assert_eq!(derived.get(48, measure::OTHER_SEPARATIONS), Some(40.0));
        // inputs untouched
        assert_eq!(cross.get(48, measure::OTHER_SEPARATIONS), None);
    }

    #[test]
    fn fetched_other_separations_is_preferred() {
        let cross = pivot_by_geography(&[
            row(48, "Texas", measure::TOTAL_SEPARATIONS, 100.0),
            row(48, "Texas", measure::QUITS, 40.0),
            row(48, "Texas", measure::LAYOFFS_AND_DISCHARGES, 20.0),
            row(48, "Texas", measure::OTHER_SEPARATIONS, 37.5),
        ]);
        let derived = derive_other_separations(&cross);
        assert_eq!(derived.get(48, measure::OTHER_SEPARATIONS), Some(37.5));
    }

    #[test]
    fn missing_component_leaves_residual_absent() {
        let cross = pivot_by_geography(&[
            row(48, "Texas", measure::TOTAL_SEPARATIONS, 100.0),
            row(48, "Texas", measure::QUITS, 40.0),
        ]);
        let derived = derive_other_separations(&cross);
        assert_eq!(derived.get(48, measure::OTHER_SEPARATIONS), None);
        assert!(derived.has_measure(measure::OTHER_SEPARATIONS));
    }

    #[test]
    fn components_sum_back_to_total() {
        let cross = pivot_by_geography(&[
            row(6, "California", measure::TOTAL_SEPARATIONS, 250.25),
            row(6, "California", measure::QUITS, 130.5),
            row(6, "California", measure::LAYOFFS_AND_DISCHARGES, 70.25),
        ]);
        let derived = derive_other_separations(&cross);
        let other = derived.get(6, measure::OTHER_SEPARATIONS).unwrap();
        let total = derived.get(6, measure::TOTAL_SEPARATIONS).unwrap();
        let quits = derived.get(6, measure::QUITS).unwrap();
        let layoffs = derived.get(6, measure::LAYOFFS_AND_DISCHARGES).unwrap();
        assert!((other + quits + layoffs - total).abs() < 1e-9);
    }
}
