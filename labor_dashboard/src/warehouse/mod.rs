//! Executor abstraction over the statistics warehouse.
//!
//! This module defines the [`QueryExecutor`] trait, the seam between the
//! view pipelines and whatever actually runs SQL. The dashboard never talks
//! to a live warehouse directly; executors are passed explicitly into each
//! view call (acquired at view start, dropped at view end) so there is no
//! process-wide connection state.
//!
//! The trait supports dynamic dispatch (`dyn QueryExecutor`) so a caller can
//! pick the backing at runtime, e.g. a fixture executor in tests or a cached
//! wrapper in the CLI.

pub mod fixture;

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use fixture::FixtureExecutor;

/// Errors from the warehouse/query layer. Any of these aborts the view's
/// pipeline before a transform runs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The warehouse connection could not be established or dropped.
    #[error("warehouse connection failed: {0}")]
    Connection(String),

    /// The query itself failed (malformed SQL, permission, timeout). An
    /// empty result set is *not* an error.
    #[error("query failed: {0}")]
    Query(String),

    /// A result row is missing an expected column.
    #[error("result decode failed: missing column {0:?}")]
    MissingColumn(String),

    /// A result cell has the wrong type for the requested getter.
    #[error("result decode failed: column {column:?} is not {expected}")]
    WrongType {
        /// The column that failed to decode.
        column: String,
        /// What the caller asked for.
        expected: &'static str,
    },

    /// A DATE column held an unparseable date token.
    #[error("result decode failed: bad date in column {column:?}: {source}")]
    BadDate {
        /// The column that failed to decode.
        column: String,
        /// The underlying chrono parse error.
        source: chrono::format::ParseError,
    },

    /// A geography identifier did not end in a numeric id (`geo/NN`).
    #[error("result decode failed: malformed geography id {0:?}")]
    BadGeoId(String),

    /// The fixture executor has no dataset registered for this query.
    #[error("no fixture dataset registered for query {0:?}")]
    UnknownQuery(String),
}

/// A single bind parameter or result cell value.
///
/// Round-trips through JSON untagged, so fixture rows read naturally:
/// `null`, `true`, `42`, `10.5`, `"text"`. Warehouse DATE columns arrive as
/// `"YYYY-MM-DD"` text and are parsed on access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    /// SQL NULL.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// Text (including date tokens).
    Text(String),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{b}"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::Float(x) => write!(f, "{x}"),
            SqlValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(i: i64) -> Self {
        SqlValue::Int(i)
    }
}

impl From<f64> for SqlValue {
    fn from(x: f64) -> Self {
        SqlValue::Float(x)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(d: NaiveDate) -> Self {
        SqlValue::Text(d.format("%Y-%m-%d").to_string())
    }
}

/// One result row: named columns in select order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, SqlValue>);

impl Row {
    /// Builds a row from (column, value) pairs. Mostly used by fixtures.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn value(&self, column: &str) -> Result<&SqlValue, FetchError> {
        self.0
            .get(column)
            .ok_or_else(|| FetchError::MissingColumn(column.to_string()))
    }

    /// True if the cell is absent or SQL NULL.
    pub fn is_null(&self, column: &str) -> bool {
        matches!(self.0.get(column), None | Some(SqlValue::Null))
    }

    /// Text cell.
    pub fn text(&self, column: &str) -> Result<&str, FetchError> {
        match self.value(column)? {
            SqlValue::Text(s) => Ok(s),
            _ => Err(FetchError::WrongType {
                column: column.to_string(),
                expected: "text",
            }),
        }
    }

    /// Numeric cell; integers coerce to float.
    pub fn float(&self, column: &str) -> Result<f64, FetchError> {
        match self.value(column)? {
            SqlValue::Float(x) => Ok(*x),
            SqlValue::Int(i) => Ok(*i as f64),
            _ => Err(FetchError::WrongType {
                column: column.to_string(),
                expected: "a number",
            }),
        }
    }

    /// Integer cell.
    pub fn int(&self, column: &str) -> Result<i64, FetchError> {
        match self.value(column)? {
            SqlValue::Int(i) => Ok(*i),
            _ => Err(FetchError::WrongType {
                column: column.to_string(),
                expected: "an integer",
            }),
        }
    }

    /// DATE cell, parsed from `YYYY-MM-DD` text.
    pub fn date(&self, column: &str) -> Result<NaiveDate, FetchError> {
        let text = self.text(column)?;
        NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|source| FetchError::BadDate {
            column: column.to_string(),
            source,
        })
    }
}

/// Executes parameterized SQL against the warehouse.
///
/// `params` binds positionally to `?` placeholders; an empty result set is a
/// valid outcome, not an error. Execution is synchronous and may block the
/// calling thread for the duration of the query.
pub trait QueryExecutor {
    /// Runs the statement and returns all rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, FetchError>;
}
