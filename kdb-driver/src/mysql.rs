//! MySQL catalog connection over SQLx.

use kdb_introspect::{CatalogConnection, CatalogRow, Dialect, QueryError};
use sqlx::Connection;
use sqlx::mysql::MySqlConnection;
use tokio::runtime::Runtime;

use crate::Error;
use crate::rows::{classify, decode_row};

/// A single MySQL connection.
pub struct MySqlCatalog {
    conn: MySqlConnection,
    runtime: Runtime,
}

impl MySqlCatalog {
    /// Connect to a `mysql://` URL.
    pub fn connect(url: &str) -> crate::Result<Self> {
        let runtime = crate::runtime()?;
        let conn = runtime
            .block_on(MySqlConnection::connect(url))
            .map_err(|err| Error::connect(Dialect::Mysql, err))?;
        Ok(Self { conn, runtime })
    }
}

impl CatalogConnection for MySqlCatalog {
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
