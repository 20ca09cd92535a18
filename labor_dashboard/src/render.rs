//! Plain-text tables for the "Show data" panels.

use std::fmt;

use labor_timeseries::models::WideTable;
use labor_timeseries::pivot::CrossSection;

/// Renders value cells the way the data panels show them.
fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}"),
        None => String::new(),
    }
}

/// Left-aligned fixed-width grid; empty cells stay blank.
fn write_grid(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: &[Vec<String>],
) -> fmt::Result {
    if rows.is_empty() {
        return write!(f, "No data");
    }
    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }
    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            write!(f, "  ")?;
        }
        write!(f, "{header:<width$}", width = widths[i])?;
    }
    writeln!(f)?;
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{cell:<width$}", width = widths[i])?;
        }
        writeln!(f)?;
    }
    Ok(())
}

/// Displays a [`WideTable`] as a period-rowed text table.
pub struct WideTableDisplay<'a>(pub &'a WideTable);

impl fmt::Display for WideTableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.0;
        let mut headers = vec!["PERIOD".to_string()];
        headers.extend(table.columns().map(String::from));
        let rows: Vec<Vec<String>> = table
            .periods()
            .map(|period| {
                let mut row = vec![period.to_string()];
                row.extend(table.columns().map(|c| cell(table.get(period, c))));
                row
            })
            .collect();
        write_grid(f, &headers, &rows)
    }
}

/// Displays a [`CrossSection`] as a geography-rowed text table.
pub struct CrossSectionDisplay<'a>(pub &'a CrossSection);

impl fmt::Display for CrossSectionDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cross = self.0;
        let mut headers = vec!["GEO_ID".to_string(), "GEO_NAME".to_string()];
        headers.extend(cross.measures().map(String::from));
        let rows: Vec<Vec<String>> = cross
            .geographies()
            .map(|(geo_id, geo_name)| {
                let mut row = vec![geo_id.to_string(), geo_name.to_string()];
                row.extend(cross.measures().map(|m| cell(cross.get(geo_id, m))));
                row
            })
            .collect();
        write_grid(f, &headers, &rows)
    }
}
