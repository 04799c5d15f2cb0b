//! Shared SQLx row decoding and error classification.

use kdb_introspect::{CatalogRow, CatalogValue, QueryError};
use sqlx::{ColumnIndex, Decode, Row, Type};

/// Decode every column of `row` into a [`CatalogRow`].
///
/// Catalog columns are text or integers. Text reported as binary (MySQL
/// returns some `SHOW` columns as blobs) is decoded lossily as UTF-8.
pub(crate) fn decode_row<R>(row: &R) -> CatalogRow
where
    R: Row,
    usize: ColumnIndex<R>,
    for<'r> Option<String>: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> Option<i64>: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> Option<Vec<u8>>: Decode<'r, R::Database> + Type<R::Database>,
{
    (0..row.len()).map(|index| decode_value(row, index)).collect()
}

fn decode_value<R>(row: &R, index: usize) -> CatalogValue
where
    R: Row,
    usize: ColumnIndex<R>,
    for<'r> Option<String>: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> Option<i64>: Decode<'r, R::Database> + Type<R::Database>,
    for<'r> Option<Vec<u8>>: Decode<'r, R::Database> + Type<R::Database>,
{
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return value.into();
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return value
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .into();
    }
    CatalogValue::Null
}

/// Separate connection-level failures from rejected statements.
pub(crate) fn classify(err: sqlx::Error) -> QueryError {
    if is_connection_error(&err) {
        QueryError::connection(err)
    } else {
        QueryError::statement(err)
    }
}

fn is_connection_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
    )
}
