//! Period-over-period percentage changes.

use crate::models::{Period, WideTable};

/// Suffix appended to a value column's name to form its percentage column.
pub const PERCENTAGE_SUFFIX: &str = " PERCENTAGE";

/// The percentage column name for a value column.
///
/// Value columns follow the dashboard convention of uppercase labels, so the
/// suffix is appended as-is; the case normalization for long-format category
/// labels lives in [`crate::join`].
pub fn percentage_column(column: &str) -> String {
    format!("{column}{PERCENTAGE_SUFFIX}")
}

/// Computes period-over-period percentage change per column.
///
/// With the table's periods sorted ascending as `p[0] < p[1] < ...`, the
/// output cell at `p[i]` (for `i >= 1`) is
/// `(v[p[i]] - v[p[i-1]]) / v[p[i-1]] * 100`. The first period has no prior
/// period and stays absent, as does any cell where either operand is
/// missing. A zero previous value follows IEEE-754: the cell holds `±inf`
/// (or NaN for `0/0`) instead of raising an arithmetic fault.
///
/// The result is a fresh table with one `<COL> PERCENTAGE` column per input
/// column, indexed by the same periods; the input is left untouched.
pub fn percentage_changes(table: &WideTable) -> WideTable {
    let periods: Vec<Period> = table.periods().collect();
    let mut out = WideTable::new();
    for column in table.columns() {
        let pct_column = percentage_column(column);
        out.add_column(&pct_column);
        for pair in periods.windows(2) {
            let (prev, current) = (pair[0], pair[1]);
            if let (Some(prev_value), Some(value)) = (table.get(prev, column), table.get(current, column))
            {
                out.insert(current, &pct_column, (value - prev_value) / prev_value * 100.0);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;

    fn two_year_table() -> WideTable {
        let mut t = WideTable::new();
        t.insert(Period::Year(2020), "ALL ITEMS", 100.0);
        t.insert(Period::Year(2021), "ALL ITEMS", 110.0);
        t.insert(Period::Year(2020), "FOOD", 50.0);
        t.insert(Period::Year(2021), "FOOD", 55.0);
        t
    }

    #[test]
    fn first_period_has_no_percentage() {
        let pct = percentage_changes(&two_year_table());
        assert_eq!(pct.get(Period::Year(2020), "ALL ITEMS PERCENTAGE"), None);
        assert_eq!(pct.get(Period::Year(2020), "FOOD PERCENTAGE"), None);
    }

    #[test]
    fn later_periods_match_the_formula() {
        let pct = percentage_changes(&two_year_table());
        let all = pct.get(Period::Year(2021), "ALL ITEMS PERCENTAGE").unwrap();
        let food = pct.get(Period::Year(2021), "FOOD PERCENTAGE").unwrap();
        assert!((all - 10.0).abs() < 1e-9);
        assert!((food - 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_previous_value_yields_infinity_not_a_fault() {
        let mut t = WideTable::new();
        t.insert(Period::Year(2020), "A", 0.0);
        t.insert(Period::Year(2021), "A", 5.0);
        let pct = percentage_changes(&t);
        let v = pct.get(Period::Year(2021), "A PERCENTAGE").unwrap();
        assert!(v.is_infinite() && v.is_sign_positive());
    }

    #[test]
    fn zero_over_zero_is_nan() {
        let mut t = WideTable::new();
        t.insert(Period::Year(2020), "A", 0.0);
        t.insert(Period::Year(2021), "A", 0.0);
        let pct = percentage_changes(&t);
        assert!(pct.get(Period::Year(2021), "A PERCENTAGE").unwrap().is_nan());
    }

    #[test]
    fn missing_operand_leaves_cell_absent() {
        // A is absent in 2021, so neither 2021 (missing current) nor 2022
        // (missing previous) gets a percentage.
        let mut t = WideTable::new();
        t.insert(Period::Year(2020), "A", 1.0);
        t.insert(Period::Year(2021), "B", 1.0);
        t.insert(Period::Year(2022), "A", 2.0);
        let pct = percentage_changes(&t);
        assert_eq!(pct.get(Period::Year(2021), "A PERCENTAGE"), None);
        assert_eq!(pct.get(Period::Year(2022), "A PERCENTAGE"), None);
    }

    #[test]
    fn single_period_table_keeps_columns_but_no_rows() {
        let mut t = WideTable::new();
        t.insert(Period::Year(2020), "A", 1.0);
        let pct = percentage_changes(&t);
        assert!(pct.has_column("A PERCENTAGE"));
        assert!(pct.is_empty());
    }
}
