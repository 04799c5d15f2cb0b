//! The [`Introspector`] trait and the raw shapes it produces.

use tracing::debug;

use crate::catalog::{CatalogConnection, CatalogRow};
use crate::dialect::Dialect;
use crate::error::{Error, Result};

/// A column as reported by the catalog, before type mapping and naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    /// Unmodified type declaration, e.g. `varchar(255)` or `INT(11) unsigned`.
    pub raw_type: String,
    pub nullable: bool,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable,
        }
    }
}

/// A table and its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub name: String,
    pub columns: Vec<RawColumn>,
}

/// Reads table and column metadata from a live connection.
///
/// Implementations enumerate tables first, then columns, strictly in
/// sequence. Tables come back in the dialect's catalog order and columns in
/// ordinal order. The first failing query aborts the whole call.
pub trait Introspector {
    /// The dialect this introspector reads.
    fn dialect(&self) -> Dialect;

    /// Enumerate every table with its columns.
    fn introspect(&self, conn: &mut dyn CatalogConnection) -> Result<Vec<RawTable>>;
}

/// Run a single-column query and collect the text values.
pub(crate) fn query_names(
    conn: &mut dyn CatalogConnection,
    sql: &str,
    params: &[&str],
    context: &str,
) -> Result<Vec<String>> {
    let rows = conn
        .query_rows(sql, params)
        .map_err(|e| Error::query(context, e))?;

    rows.iter()
        .map(|row| {
            row.text(0)
                .map(str::to_string)
                .ok_or_else(|| Error::malformed(context, 0))
        })
        .collect()
}

/// Run a column query and decode each row with `decode`.
pub(crate) fn query_columns(
    conn: &mut dyn CatalogConnection,
    sql: &str,
    params: &[&str],
    context: &str,
    decode: impl Fn(&CatalogRow) -> std::result::Result<RawColumn, usize>,
) -> Result<Vec<RawColumn>> {
    let rows = conn
        .query_rows(sql, params)
        .map_err(|e| Error::query(context, e))?;

    rows.iter()
        .map(|row| decode(row).map_err(|column| Error::malformed(context, column)))
        .collect()
}

/// Enumerate tables, then the columns of each table in order.
pub(crate) fn two_phase(
    conn: &mut dyn CatalogConnection,
    tables: Vec<String>,
    mut columns: impl FnMut(&mut dyn CatalogConnection, &str) -> Result<Vec<RawColumn>>,
) -> Result<Vec<RawTable>> {
    let mut result = Vec::with_capacity(tables.len());

    for name in tables {
        let cols = columns(&mut *conn, &name)?;
        debug!(table = %name, columns = cols.len(), "Loaded columns");
        result.push(RawTable {
            name,
            columns: cols,
        });
    }

    Ok(result)
}

/// Read a required text value, reporting the column index when missing.
pub(crate) fn required(row: &CatalogRow, index: usize) -> std::result::Result<&str, usize> {
    row.text(index).ok_or(index)
}

/// Interpret `YES`/`NO` nullability columns.
pub(crate) fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("yes"))
}
