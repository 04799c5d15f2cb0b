//! In-memory [`CatalogConnection`] for tests.

use crate::catalog::{CatalogConnection, CatalogRow, QueryError};

struct Expectation {
    sql_contains: String,
    params: Option<Vec<String>>,
    result: Result<Vec<CatalogRow>, String>,
}

/// Answers queries from canned responses, matched by SQL substring (and
/// optionally parameters) in registration order. Every query is recorded.
#[derive(Default)]
pub struct FakeCatalog {
    expectations: Vec<Expectation>,
    queries: Vec<(String, Vec<String>)>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, sql_contains: &str, rows: Vec<CatalogRow>) -> Self {
        self.push(sql_contains, None, Ok(rows));
        self
    }

    pub fn on_with(mut self, sql_contains: &str, params: &[&str], rows: Vec<CatalogRow>) -> Self {
        let params = params.iter().map(|p| p.to_string()).collect();
        self.push(sql_contains, Some(params), Ok(rows));
        self
    }

    /// Fail matching queries with a statement error.
    pub fn fail(mut self, sql_contains: &str, message: &str) -> Self {
        self.push(sql_contains, None, Err(message.to_string()));
        self
    }

    pub fn queries(&self) -> &[(String, Vec<String>)] {
        &self.queries
    }

    fn push(
        &mut self,
        sql_contains: &str,
        params: Option<Vec<String>>,
        result: Result<Vec<CatalogRow>, String>,
    ) {
        self.expectations.push(Expectation {
            sql_contains: sql_contains.to_string(),
            params,
            result,
        });
    }
}

impl CatalogConnection for FakeCatalog {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError> {
        let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        self.queries.push((sql.to_string(), params.clone()));

        let expectation = self
            .expectations
            .iter()
            .find(|e| {
                sql.contains(&e.sql_contains) && e.params.as_ref().is_none_or(|p| *p == params)
            })
            .ok_or_else(|| QueryError::statement(format!("unexpected query: {sql}")))?;

        expectation
            .result
            .clone()
            .map_err(QueryError::statement)
    }
}
