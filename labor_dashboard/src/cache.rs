//! Memoizing wrapper around a [`QueryExecutor`].
//!
//! Results are keyed by (SQL text, encoded bind parameters) and live for the
//! lifetime of the wrapper, which is owned by the view session that created
//! it — there is no process-global cache. Rows are shared read-only through
//! `Arc`, so repeated renders reuse the same allocation; failed queries are
//! never stored, so an error in one view cannot poison what another view
//! already cached.

use std::collections::HashMap;
use std::sync::Arc;

use crate::warehouse::{FetchError, QueryExecutor, Row, SqlValue};

/// Cache key encoding for a bind-parameter slice.
///
/// JSON keeps distinct bind lists distinct regardless of what bytes the
/// values contain. Serializing [`SqlValue`] cannot fail, so the fallback is
/// unreachable.
fn encode_params(params: &[SqlValue]) -> String {
    serde_json::to_string(params).unwrap_or_default()
}

/// A [`QueryExecutor`] that serves repeated identical statements from memory.
pub struct CachedExecutor<E> {
    inner: E,
    entries: HashMap<(String, String), Arc<Vec<Row>>>,
}

impl<E: QueryExecutor> CachedExecutor<E> {
    /// Wraps an executor with an empty cache.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            entries: HashMap::new(),
        }
    }

    /// Executes through the cache, sharing the stored rows.
    pub fn fetch(&mut self, sql: &str, params: &[SqlValue]) -> Result<Arc<Vec<Row>>, FetchError> {
        let key = (sql.to_string(), encode_params(params));
        if let Some(rows) = self.entries.get(&key) {
            tracing::debug!(sql, "query cache hit");
            return Ok(Arc::clone(rows));
        }
        tracing::debug!(sql, "query cache miss");
        let rows = Arc::new(self.inner.execute(sql, params)?);
        self.entries.insert(key, Arc::clone(&rows));
        Ok(rows)
    }

    /// Drops every cached result.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Number of cached statements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: QueryExecutor> QueryExecutor for CachedExecutor<E> {
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, FetchError> {
        self.fetch(sql, params).map(|rows| (*rows).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts executions and fails on demand.
    struct Counting {
        calls: usize,
        fail: bool,
    }

    impl QueryExecutor for Counting {
        fn execute(&mut self, _sql: &str, _params: &[SqlValue]) -> Result<Vec<Row>, FetchError> {
            self.calls += 1;
            if self.fail {
                return Err(FetchError::Query("boom".to_string()));
            }
            Ok(vec![Row::from_pairs([("N", self.calls as i64)])])
        }
    }

    #[test]
    fn identical_statements_hit_the_cache() {
        let mut cached = CachedExecutor::new(Counting {
            calls: 0,
            fail: false,
        });
        let first = cached.fetch("SELECT X", &[]).unwrap();
        let second = cached.fetch("SELECT X", &[]).unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.calls, 1);
    }

    #[test]
    fn different_binds_miss() {
        let mut cached = CachedExecutor::new(Counting {
            calls: 0,
            fail: false,
        });
        cached.fetch("SELECT X", &[SqlValue::Int(1)]).unwrap();
        cached.fetch("SELECT X", &[SqlValue::Int(2)]).unwrap();
        assert_eq!(cached.inner.calls, 2);
    }

    #[test]
    fn separator_bytes_in_binds_do_not_alias() {
        let mut cached = CachedExecutor::new(Counting {
            calls: 0,
            fail: false,
        });
        cached
            .fetch("SELECT X", &[SqlValue::Text("a\x1fb".into())])
            .unwrap();
        cached
            .fetch(
                "SELECT X",
                &[SqlValue::Text("a".into()), SqlValue::Text("b".into())],
            )
            .unwrap();
        assert_eq!(cached.inner.calls, 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cached = CachedExecutor::new(Counting {
            calls: 0,
            fail: true,
        });
        assert!(cached.fetch("SELECT X", &[]).is_err());
        assert!(cached.is_empty());
        cached.inner.fail = false;
        assert!(cached.fetch("SELECT X", &[]).is_ok());
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn invalidate_all_forces_re_execution() {
        let mut cached = CachedExecutor::new(Counting {
            calls: 0,
            fail: false,
        });
        cached.fetch("SELECT X", &[]).unwrap();
        cached.invalidate_all();
        cached.fetch("SELECT X", &[]).unwrap();
        assert_eq!(cached.inner.calls, 2);
    }
}
