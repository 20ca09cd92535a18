//! The dashboard's SQL catalog and row decoding.
//!
//! Every statement binds its filters as positional `?` parameters; nothing
//! is spliced into the SQL text, including the industry IN-list (the
//! placeholder list is generated to match the bound slice).
//!
//! Each query has a typed fetch function that executes it and decodes the
//! rows into domain records. An empty result decodes to an empty collection.

use chrono::{Datelike, NaiveDate};

use labor_timeseries::models::{LongSeries, Observation, Period, PeriodUnit};
use labor_timeseries::pivot::GeoMeasureRow;

use crate::warehouse::{FetchError, QueryExecutor, SqlValue};

/// CPI variable identifiers as published in the warehouse share.
pub mod cpi_variable {
    /// All items, NSA, annual.
    pub const ALL_ITEMS_ANNUAL: &str = "CPI:_All_items,_Not_seasonally_adjusted,_Annual";
    /// Food, NSA, annual.
    pub const FOOD_ANNUAL: &str = "CPI:_Food,_Not_seasonally_adjusted,_Annual";
    /// Energy, NSA, annual.
    pub const ENERGY_ANNUAL: &str = "CPI:_Energy,_Not_seasonally_adjusted,_Annual";
    /// All items less food and energy, NSA, annual.
    pub const CORE_ANNUAL: &str =
        "CPI:_All_items_less_food_and_energy,_Not_seasonally_adjusted,_Annual";
    /// All items, NSA, monthly.
    pub const ALL_ITEMS_MONTHLY: &str = "CPI:_All_items,_Not_seasonally_adjusted,_Monthly";
    /// Food, NSA, monthly.
    pub const FOOD_MONTHLY: &str = "CPI:_Food,_Not_seasonally_adjusted,_Monthly";
    /// Energy, NSA, monthly.
    pub const ENERGY_MONTHLY: &str = "CPI:_Energy,_Not_seasonally_adjusted,_Monthly";
    /// All items less food and energy, NSA, monthly.
    pub const CORE_MONTHLY: &str =
        "CPI:_All_items_less_food_and_energy,_Not_seasonally_adjusted,_Monthly";
}

/// The USA country geography id.
pub const GEO_USA: &str = "country/USA";

/// National annual CPI for the four headline variables.
pub const CPI_ANNUAL_SQL: &str = "SELECT VARIABLE, VARIABLE_NAME, VALUE, DATE \
    FROM BLS_PRICE_TIMESERIES \
    WHERE GEO_ID = 'country/USA' AND VARIABLE IN (?, ?, ?, ?)";

/// Monthly CPI (all geographies) for the four headline variables since a
/// bound date. Geography is filtered client-side, as the dashboard also
/// inspects the distribution of rows it discards.
pub const CPI_MONTHLY_SQL: &str = "SELECT GEO_ID, GEO_NAME, TS.VARIABLE, TS.VARIABLE_NAME, \
    PRODUCT, VALUE, LEVEL, DATE \
    FROM BLS_PRICE_TIMESERIES AS TS \
    JOIN BLS_PRICE_ATTRIBUTES AS ATT ON (TS.VARIABLE = ATT.VARIABLE) \
    JOIN BLS_GEO_INDEX AS GEO ON (TS.GEO_ID = GEO.ID) \
    WHERE ATT.REPORT = 'Consumer Price Index' \
    AND TS.DATE >= ? \
    AND TS.VARIABLE IN (?, ?, ?, ?) \
    ORDER BY DATE";

/// Latest date with any employment observation.
pub const MAX_EMPLOYMENT_DATE_SQL: &str =
    "SELECT MAX(DATE) AS MAX_DATE FROM BLS_EMPLOYMENT_TIMESERIES";

/// National annual JOLTS level series, one row per (measure, industry, year).
pub const JOLTS_NATIONAL_SQL: &str = "SELECT TS.VARIABLE, VALUE, DATE, MEASURE, INDUSTRY \
    FROM BLS_EMPLOYMENT_TIMESERIES AS TS \
    JOIN BLS_EMPLOYMENT_ATTRIBUTES AS ATT ON (TS.VARIABLE = ATT.VARIABLE) \
    WHERE GEO_ID = 'country/USA' AND ATT.UNIT = 'Level' \
    AND REPORT = 'JOLTS' AND FREQUENCY = 'Annual'";

/// State-level annual JOLTS level series.
pub const JOLTS_STATE_SQL: &str = "SELECT TS.VARIABLE, VALUE, DATE, MEASURE, INDUSTRY, \
    GEO.ID, GEO.GEO_NAME \
    FROM BLS_EMPLOYMENT_TIMESERIES AS TS \
    JOIN BLS_EMPLOYMENT_ATTRIBUTES AS ATT ON (TS.VARIABLE = ATT.VARIABLE) \
    JOIN BLS_GEO_INDEX AS GEO ON (TS.GEO_ID = GEO.ID) \
    WHERE GEO.LEVEL = 'State' AND ATT.UNIT = 'Level' \
    AND REPORT = 'JOLTS' AND FREQUENCY = 'Annual' \
    ORDER BY GEO_NAME, DATE";

/// Top-level industries (sub-industries carry a `:` in their name).
pub const INDUSTRIES_SQL: &str = "SELECT DISTINCT(INDUSTRY) AS INDUSTRY \
    FROM BLS_EMPLOYMENT_ATTRIBUTES WHERE INDUSTRY NOT LIKE '%:%'";

/// Metro-area geography names.
pub const METRO_AREAS_SQL: &str = "SELECT GEO_NAME FROM BLS_GEO_INDEX \
    WHERE LEVEL = 'CensusCoreBasedStatisticalArea' AND GEO_NAME LIKE '%Metro Area'";

const METRO_EMPLOYMENT_SELECT: &str = "SELECT GEO.GEO_NAME, ATT.INDUSTRY, TS.DATE, TS.VALUE \
    FROM BLS_EMPLOYMENT_TIMESERIES AS TS \
    JOIN BLS_EMPLOYMENT_ATTRIBUTES AS ATT ON (TS.VARIABLE = ATT.VARIABLE) \
    JOIN BLS_GEO_INDEX AS GEO ON (TS.GEO_ID = GEO.ID) \
    WHERE ATT.REPORT = 'State and Metro Employment' \
    AND ATT.MEASURE = 'All Employees' \
    AND ATT.FREQUENCY = 'Monthly' \
    AND ATT.SEASONALLY_ADJUSTED = FALSE \
    AND GEO.LEVEL = 'CensusCoreBasedStatisticalArea' \
    AND ATT.INDUSTRY IN (";

/// Monthly metro employment for a bound industry list since a bound date.
/// The placeholder list is sized to the industry slice; binds are the
/// industries followed by the date threshold.
pub fn metro_employment_sql(industry_count: usize) -> String {
    let placeholders = vec!["?"; industry_count].join(", ");
    format!("{METRO_EMPLOYMENT_SELECT}{placeholders}) AND TS.DATE >= ? ORDER BY TS.DATE")
}

/// Fixture dataset names, one per catalog query.
pub mod dataset {
    /// Rows for [`super::CPI_ANNUAL_SQL`].
    pub const CPI_ANNUAL: &str = "cpi_annual";
    /// Rows for [`super::CPI_MONTHLY_SQL`].
    pub const CPI_MONTHLY: &str = "cpi_monthly";
    /// Rows for [`super::MAX_EMPLOYMENT_DATE_SQL`].
    pub const MAX_EMPLOYMENT_DATE: &str = "max_employment_date";
    /// Rows for [`super::JOLTS_NATIONAL_SQL`].
    pub const JOLTS_NATIONAL: &str = "jolts_national";
    /// Rows for [`super::JOLTS_STATE_SQL`].
    pub const JOLTS_STATE: &str = "jolts_state";
    /// Rows for [`super::INDUSTRIES_SQL`].
    pub const INDUSTRIES: &str = "industries";
    /// Rows for [`super::METRO_AREAS_SQL`].
    pub const METRO_AREAS: &str = "metro_areas";
    /// Rows for [`super::metro_employment_sql`].
    pub const METRO_EMPLOYMENT: &str = "metro_employment";
}

/// Maps a catalog statement back to its fixture dataset name.
pub fn query_dataset(sql: &str) -> Option<&'static str> {
    match sql {
        CPI_ANNUAL_SQL => Some(dataset::CPI_ANNUAL),
        CPI_MONTHLY_SQL => Some(dataset::CPI_MONTHLY),
        MAX_EMPLOYMENT_DATE_SQL => Some(dataset::MAX_EMPLOYMENT_DATE),
        JOLTS_NATIONAL_SQL => Some(dataset::JOLTS_NATIONAL),
        JOLTS_STATE_SQL => Some(dataset::JOLTS_STATE),
        INDUSTRIES_SQL => Some(dataset::INDUSTRIES),
        METRO_AREAS_SQL => Some(dataset::METRO_AREAS),
        s if s.starts_with(METRO_EMPLOYMENT_SELECT) => Some(dataset::METRO_EMPLOYMENT),
        _ => None,
    }
}

/// One monthly CPI row before the geography filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CpiMonthlyRecord {
    /// Geography id, e.g. `"country/USA"`.
    pub geo_id: String,
    /// Warehouse variable id (the reshape key).
    pub variable: String,
    /// Product label, e.g. `"All items"` (the percentage-join key).
    pub product: String,
    /// Calendar month of the observation.
    pub month: Period,
    /// Index value.
    pub value: f64,
}

/// One state-level JOLTS row.
#[derive(Debug, Clone, PartialEq)]
pub struct StateMeasureRecord {
    /// Calendar year of the observation.
    pub year: i32,
    /// Geography/measure/value triple ready for pivoting.
    pub row: GeoMeasureRow,
}

/// One metro-area employment row.
#[derive(Debug, Clone, PartialEq)]
pub struct MetroEmploymentRecord {
    /// Metro-area name.
    pub area: String,
    /// Industry label.
    pub industry: String,
    /// Calendar month of the observation.
    pub month: Period,
    /// Employee count.
    pub value: f64,
}

/// Fetches the annual national CPI series, keyed by variable id.
pub fn fetch_cpi_annual(exec: &mut dyn QueryExecutor) -> Result<LongSeries, FetchError> {
    let params: Vec<SqlValue> = [
        cpi_variable::ALL_ITEMS_ANNUAL,
        cpi_variable::FOOD_ANNUAL,
        cpi_variable::ENERGY_ANNUAL,
        cpi_variable::CORE_ANNUAL,
    ]
    .into_iter()
    .map(SqlValue::from)
    .collect();
    let rows = exec.execute(CPI_ANNUAL_SQL, &params)?;
    rows.iter()
        .map(|row| {
            Ok(Observation::new(
                row.text("VARIABLE")?,
                Period::from_date(row.date("DATE")?, PeriodUnit::Year),
                row.float("VALUE")?,
            ))
        })
        .collect()
}

/// Fetches monthly CPI rows since `since` for the four headline variables.
pub fn fetch_cpi_monthly(
    exec: &mut dyn QueryExecutor,
    since: NaiveDate,
) -> Result<Vec<CpiMonthlyRecord>, FetchError> {
    let mut params = vec![SqlValue::from(since)];
    params.extend(
        [
            cpi_variable::ALL_ITEMS_MONTHLY,
            cpi_variable::ENERGY_MONTHLY,
            cpi_variable::FOOD_MONTHLY,
            cpi_variable::CORE_MONTHLY,
        ]
        .into_iter()
        .map(SqlValue::from),
    );
    let rows = exec.execute(CPI_MONTHLY_SQL, &params)?;
    rows.iter()
        .map(|row| {
            Ok(CpiMonthlyRecord {
                geo_id: row.text("GEO_ID")?.to_string(),
                variable: row.text("VARIABLE")?.to_string(),
                product: row.text("PRODUCT")?.to_string(),
                month: Period::from_date(row.date("DATE")?, PeriodUnit::Month),
                value: row.float("VALUE")?,
            })
        })
        .collect()
}

/// The latest date carrying any employment observation, if the table has
/// rows at all.
pub fn fetch_max_employment_date(
    exec: &mut dyn QueryExecutor,
) -> Result<Option<NaiveDate>, FetchError> {
    let rows = exec.execute(MAX_EMPLOYMENT_DATE_SQL, &[])?;
    match rows.first() {
        None => Ok(None),
        Some(row) if row.is_null("MAX_DATE") => Ok(None),
        Some(row) => Ok(Some(row.date("MAX_DATE")?)),
    }
}

/// Fetches the national annual JOLTS series, keyed by measure label.
/// One measure yields one observation per (industry, year); the national
/// view sums them into annual totals.
pub fn fetch_jolts_national(exec: &mut dyn QueryExecutor) -> Result<LongSeries, FetchError> {
    let rows = exec.execute(JOLTS_NATIONAL_SQL, &[])?;
    rows.iter()
        .map(|row| {
            Ok(Observation::new(
                row.text("MEASURE")?,
                Period::from_date(row.date("DATE")?, PeriodUnit::Year),
                row.float("VALUE")?,
            ))
        })
        .collect()
}

/// Fetches every state-level annual JOLTS row. The numeric geography id is
/// the tail of the `geo/NN` identifier; anything else is a decode error.
pub fn fetch_jolts_state(
    exec: &mut dyn QueryExecutor,
) -> Result<Vec<StateMeasureRecord>, FetchError> {
    let rows = exec.execute(JOLTS_STATE_SQL, &[])?;
    rows.iter()
        .map(|row| {
            let id = row.text("ID")?;
            let geo_id = id
                .rsplit('/')
                .next()
                .and_then(|tail| tail.parse::<u32>().ok())
                .ok_or_else(|| FetchError::BadGeoId(id.to_string()))?;
            Ok(StateMeasureRecord {
                year: row.date("DATE")?.year(),
                row: GeoMeasureRow {
                    geo_id,
                    geo_name: row.text("GEO_NAME")?.to_string(),
                    measure: row.text("MEASURE")?.to_string(),
                    value: row.float("VALUE")?,
                },
            })
        })
        .collect()
}

/// Fetches the top-level industry labels.
pub fn fetch_industries(exec: &mut dyn QueryExecutor) -> Result<Vec<String>, FetchError> {
    let rows = exec.execute(INDUSTRIES_SQL, &[])?;
    rows.iter()
        .map(|row| Ok(row.text("INDUSTRY")?.to_string()))
        .collect()
}

/// Fetches the metro-area names.
pub fn fetch_metro_areas(exec: &mut dyn QueryExecutor) -> Result<Vec<String>, FetchError> {
    let rows = exec.execute(METRO_AREAS_SQL, &[])?;
    rows.iter()
        .map(|row| Ok(row.text("GEO_NAME")?.to_string()))
        .collect()
}

/// Fetches monthly metro employment for the bound industries since `since`.
pub fn fetch_metro_employment(
    exec: &mut dyn QueryExecutor,
    industries: &[String],
    since: NaiveDate,
) -> Result<Vec<MetroEmploymentRecord>, FetchError> {
    let sql = metro_employment_sql(industries.len());
    let mut params: Vec<SqlValue> = industries
        .iter()
        .map(|i| SqlValue::from(i.as_str()))
        .collect();
    params.push(SqlValue::from(since));
    let rows = exec.execute(&sql, &params)?;
    rows.iter()
        .map(|row| {
            Ok(MetroEmploymentRecord {
                area: row.text("GEO_NAME")?.to_string(),
                industry: row.text("INDUSTRY")?.to_string(),
                month: Period::from_date(row.date("DATE")?, PeriodUnit::Month),
                value: row.float("VALUE")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::Row;

    struct OneShot(Vec<Row>);

    impl QueryExecutor for OneShot {
        fn execute(&mut self, _sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn metro_sql_sizes_its_placeholder_list() {
        let sql = metro_employment_sql(3);
        assert!(sql.contains("IN (?, ?, ?)"));
        assert_eq!(query_dataset(&sql), Some(dataset::METRO_EMPLOYMENT));
    }

    #[test]
    fn catalog_statements_map_to_datasets() {
        assert_eq!(query_dataset(CPI_ANNUAL_SQL), Some(dataset::CPI_ANNUAL));
        assert_eq!(query_dataset(JOLTS_STATE_SQL), Some(dataset::JOLTS_STATE));
        assert_eq!(query_dataset("SELECT 1"), None);
    }

    #[test]
    fn state_rows_parse_the_geo_id_tail() {
        let mut exec = OneShot(vec![Row::from_pairs([
            ("VARIABLE", SqlValue::Text("jolts".into())),
            ("VALUE", SqlValue::Float(12.0)),
            ("DATE", SqlValue::Text("2021-06-01".into())),
            ("MEASURE", SqlValue::Text("Hires".into())),
            ("INDUSTRY", SqlValue::Text("Total nonfarm".into())),
            ("ID", SqlValue::Text("geography/48".into())),
            ("GEO_NAME", SqlValue::Text("Texas".into())),
        ])]);
        let records = fetch_jolts_state(&mut exec).unwrap();
        assert_eq!(records[0].year, 2021);
        assert_eq!(records[0].row.geo_id, 48);
        assert_eq!(records[0].row.geo_name, "Texas");
    }

    #[test]
    fn malformed_geo_id_is_a_decode_error() {
        let mut exec = OneShot(vec![Row::from_pairs([
            ("VARIABLE", SqlValue::Text("jolts".into())),
            ("VALUE", SqlValue::Float(12.0)),
            ("DATE", SqlValue::Text("2021-06-01".into())),
            ("MEASURE", SqlValue::Text("Hires".into())),
            ("INDUSTRY", SqlValue::Text("Total nonfarm".into())),
            ("ID", SqlValue::Text("geography/TX".into())),
            ("GEO_NAME", SqlValue::Text("Texas".into())),
        ])]);
        assert!(matches!(
            fetch_jolts_state(&mut exec),
            Err(FetchError::BadGeoId(id)) if id == "geography/TX"
        ));
    }

    #[test]
    fn max_date_handles_empty_and_null() {
        let mut empty = OneShot(vec![]);
        assert_eq!(fetch_max_employment_date(&mut empty).unwrap(), None);

        let mut null = OneShot(vec![Row::from_pairs([("MAX_DATE", SqlValue::Null)])]);
        assert_eq!(fetch_max_employment_date(&mut null).unwrap(), None);

        let mut some = OneShot(vec![Row::from_pairs([(
            "MAX_DATE",
            SqlValue::Text("2023-04-01".into()),
        )])]);
        assert_eq!(
            fetch_max_employment_date(&mut some).unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 1)
        );
    }
}
