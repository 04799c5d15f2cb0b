//! SQLite catalog connection over SQLx.

use std::str::FromStr;

use kdb_introspect::{CatalogConnection, CatalogRow, Dialect, QueryError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tokio::runtime::Runtime;

use crate::rows::{classify, decode_row};
use crate::Error;

/// A single SQLite connection.
pub struct SqliteCatalog {
    conn: SqliteConnection,
    runtime: Runtime,
}

impl SqliteCatalog {
    /// Open `url`, which may be a bare file path or a `sqlite:` URL.
    ///
    /// Database files are opened read-only and never created.
    pub fn connect(url: &str) -> crate::Result<Self> {
        let options = if url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(url)
                .map_err(|err| Error::connection_string(Dialect::Sqlite, err))?
        } else {
            SqliteConnectOptions::new().filename(url)
        };

        let options = if is_memory(url) {
            options
        } else {
            options.read_only(true).create_if_missing(false)
        };

        Self::connect_with(&options)
    }

    /// Open a connection from explicit options.
    pub fn connect_with(options: &SqliteConnectOptions) -> crate::Result<Self> {
        let runtime = crate::runtime()?;
        let conn = runtime
            .block_on(SqliteConnection::connect_with(options))
            .map_err(|err| Error::connect(Dialect::Sqlite, err))?;
        Ok(Self { conn, runtime })
    }

    #[cfg(test)]
    fn execute(&mut self, sql: &str) {
        self.runtime
            .block_on(sqlx::query(sql).execute(&mut self.conn))
            .unwrap();
    }
}

fn is_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

impl CatalogConnection for SqliteCatalog {
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
