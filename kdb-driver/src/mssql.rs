//! SQL Server catalog connection over Tiberius.

use kdb_introspect::{CatalogConnection, CatalogRow, CatalogValue, Dialect, QueryError};
use tiberius::{Client, ColumnData, Config, ToSql};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::Error;

/// A single SQL Server connection.
pub struct MssqlCatalog {
    client: Client<Compat<TcpStream>>,
    runtime: Runtime,
}

impl MssqlCatalog {
    /// Connect with an ADO.NET or `jdbc:sqlserver://` connection string.
    pub fn connect(url: &str) -> crate::Result<Self> {
        let config = parse_config(url)?;
        let runtime = crate::runtime()?;

        let client = runtime.block_on(async {
            let tcp = TcpStream::connect(config.get_addr())
                .await
                .map_err(|err| Error::connect(Dialect::Mssql, err))?;
            tcp.set_nodelay(true)
                .map_err(|err| Error::connect(Dialect::Mssql, err))?;

            Client::connect(config, tcp.compat_write())
                .await
                .map_err(|err| Error::connect(Dialect::Mssql, err))
        })?;

        Ok(Self { client, runtime })
    }
}

fn parse_config(url: &str) -> crate::Result<Config> {
    let parsed = if url.starts_with("jdbc:") {
        Config::from_jdbc_string(url)
    } else {
        Config::from_ado_string(url)
    };
    parsed.map_err(|err| Error::connection_string(Dialect::Mssql, err))
}

impl CatalogConnection for MssqlCatalog {
    fn query_rows(&mut self, sql: &str, params: &[&str]) -> Result<Vec<CatalogRow>, QueryError> {
        let params: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();

        let Self { client, runtime } = self;
        let rows = runtime.block_on(async {
            client
                .query(sql, &params[..])
                .await?
                .into_first_result()
                .await
        });

        let rows = rows.map_err(classify)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(decode_value).collect())
            .collect())
    }
}

fn decode_value(data: ColumnData<'static>) -> CatalogValue {
    match data {
        ColumnData::String(Some(value)) => CatalogValue::Text(value.into_owned()),
        ColumnData::U8(Some(value)) => CatalogValue::Int(i64::from(value)),
        ColumnData::I16(Some(value)) => CatalogValue::Int(i64::from(value)),
        ColumnData::I32(Some(value)) => CatalogValue::Int(i64::from(value)),
        ColumnData::I64(Some(value)) => CatalogValue::Int(value),
        ColumnData::Bit(Some(value)) => CatalogValue::Int(i64::from(value)),
        _ => CatalogValue::Null,
    }
}

fn classify(err: tiberius::error::Error) -> QueryError {
    use tiberius::error::Error as TdsError;

    match err {
        TdsError::Io { .. } | TdsError::Tls(_) | TdsError::Routing { .. } => {
            QueryError::connection(err)
        }
        _ => QueryError::statement(err),
    }
}
