//! A fixture-backed executor for tests and the demo CLI.

use std::collections::HashMap;

use crate::queries;
use crate::warehouse::{FetchError, QueryExecutor, Row, SqlValue};

/// Serves canned rows keyed by the catalog dataset name of the executed
/// statement (see [`queries::query_dataset`]).
///
/// Bind parameters are ignored: a fixture dataset is expected to already
/// contain exactly the rows the parameterized query would have returned.
/// Executing a statement without a registered dataset is a
/// [`FetchError::UnknownQuery`].
#[derive(Debug, Clone, Default)]
pub struct FixtureExecutor {
    datasets: HashMap<String, Vec<Row>>,
}

impl FixtureExecutor {
    /// An executor with no datasets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the rows for a dataset name.
    pub fn with_dataset(mut self, name: &str, rows: Vec<Row>) -> Self {
        self.datasets.insert(name.to_string(), rows);
        self
    }

    /// Loads datasets from a JSON object of `name -> [row, ...]`, where each
    /// row is an object of column name to cell value.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let datasets: HashMap<String, Vec<Row>> = serde_json::from_str(text)?;
        Ok(Self { datasets })
    }
}

impl QueryExecutor for FixtureExecutor {
    fn execute(&mut self, sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>, FetchError> {
        let name = queries::query_dataset(sql)
            .ok_or_else(|| FetchError::UnknownQuery(sql.to_string()))?;
        self.datasets
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::UnknownQuery(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serves_rows_by_dataset_name() {
        let mut exec = FixtureExecutor::new().with_dataset(
            queries::dataset::INDUSTRIES,
            vec![Row::from_pairs([("INDUSTRY", "Government")])],
        );
        let rows = exec.execute(queries::INDUSTRIES_SQL, &[]).unwrap();
        assert_eq!(rows[0].text("INDUSTRY").unwrap(), "Government");
    }

    #[test]
    fn unknown_statement_is_an_error() {
        let mut exec = FixtureExecutor::new();
        assert!(matches!(
            exec.execute("SELECT 1", &[]),
            Err(FetchError::UnknownQuery(_))
        ));
    }

    #[test]
    fn loads_from_json() {
        let mut exec = FixtureExecutor::from_json_str(
            r#"{"industries": [{"INDUSTRY": "Information"}, {"INDUSTRY": "Government"}]}"#,
        )
        .unwrap();
        let rows = exec.execute(queries::INDUSTRIES_SQL, &[]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].text("INDUSTRY").unwrap(), "Government");
    }
}
