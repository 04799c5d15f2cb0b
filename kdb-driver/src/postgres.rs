//! PostgreSQL catalog connection over SQLx.

use kdb_introspect::{CatalogConnection, CatalogRow, Dialect, QueryError};
use sqlx::Connection;
use sqlx::postgres::PgConnection;
use tokio::runtime::Runtime;

use crate::Error;
use crate::rows::{classify, decode_row};

/// A single PostgreSQL connection.
pub struct PgCatalog {
    conn: PgConnection,
    runtime: Runtime,
}

impl PgCatalog {
    /// Connect to a `postgres://` URL.
    pub fn connect(url: &str) -> crate::Result<Self> {
        let runtime = crate::runtime()?;
        let conn = runtime
            .block_on(PgConnection::connect(url))
            .map_err(|err| Error::connect(Dialect::Postgres, err))?;
        Ok(Self { conn, runtime })
    }
}

impl CatalogConnection for PgCatalog {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = query.bind(*param);
        }

        let rows = self
            .runtime
            .block_on(query.fetch_all(&mut self.conn))
            .map_err(classify)?;
        Ok(rows.iter().map(decode_row).collect())
    }
}
