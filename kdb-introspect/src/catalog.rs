//! The boundary between introspection and a database client library.
//!
//! Introspectors only need to run a catalog query with string parameters and
//! read the resulting rows by ordinal position. Client libraries implement
//! [`CatalogConnection`] (see the `kdb-driver` crate); tests use an in-memory
//! fake.

use thiserror::Error;

/// Boxed error from the underlying client library, message preserved.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a [`CatalogConnection`].
#[derive(Debug, Error)]
pub enum QueryError {
    /// Network, authentication or driver failure.
    #[error(transparent)]
    Connection(DriverError),
    /// The statement itself was rejected (syntax, privileges, ...).
    #[error(transparent)]
    Statement(DriverError),
}

impl QueryError {
    pub fn connection(err: impl Into<DriverError>) -> Self {
        QueryError::Connection(err.into())
    }

    pub fn statement(err: impl Into<DriverError>) -> Self {
        QueryError::Statement(err.into())
    }
}

/// A live, already opened database handle.
///
/// Implementations run one statement at a time and block until all rows are
/// available. `params` bind positionally using the dialect's own placeholder
/// syntax in `sql`.
pub trait CatalogConnection {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError>;
}

impl<C: CatalogConnection + ?Sized> CatalogConnection for &mut C {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError> {
        (**self).query_rows(sql, params)
    }
}

impl<C: CatalogConnection + ?Sized> CatalogConnection for Box<C> {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError> {
        (**self).query_rows(sql, params)
    }
}

/// A single decoded catalog value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogValue {
    Null,
    Int(i64),
    Text(String),
}

impl From<&str> for CatalogValue {
    fn from(s: &str) -> Self {
        CatalogValue::Text(s.to_string())
    }
}

impl From<String> for CatalogValue {
    fn from(s: String) -> Self {
        CatalogValue::Text(s)
    }
}

impl From<i64> for CatalogValue {
    fn from(i: i64) -> Self {
        CatalogValue::Int(i)
    }
}

impl<T: Into<CatalogValue>> From<Option<T>> for CatalogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CatalogValue::Null, Into::into)
    }
}

/// One row of a catalog query, addressed by ordinal position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    values: Vec<CatalogValue>,
}

impl CatalogRow {
    pub fn new(values: Vec<CatalogValue>) -> Self {
        Self { values }
    }

    /// Build a row of text values.
    pub fn texts(values: &[&str]) -> Self {
        Self::new(values.iter().map(|v| CatalogValue::from(*v)).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogValue> {
        self.values.get(index)
    }

    /// Read a text column. Integers are not converted.
    pub fn text(&self, index: usize) -> Option<&str> {
        match self.values.get(index)? {
            CatalogValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Read an integer column, parsing text if the driver reported one.
    pub fn int(&self, index: usize) -> Option<i64> {
        match self.values.get(index)? {
            CatalogValue::Int(i) => Some(*i),
            CatalogValue::Text(s) => s.trim().parse().ok(),
            CatalogValue::Null => None,
        }
    }
}

impl FromIterator<CatalogValue> for CatalogRow {
    fn from_iter<I: IntoIterator<Item = CatalogValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
