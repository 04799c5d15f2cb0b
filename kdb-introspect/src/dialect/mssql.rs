//! Microsoft SQL Server.
//!
//! Tables come from `INFORMATION_SCHEMA.TABLES` ordered by name, columns from
//! a parameterized `INFORMATION_SCHEMA.COLUMNS` query per table. `DATA_TYPE`
//! is a bare name, but is parsed the same free-form way as SQLite.

use kdb_ir::{CanonicalType, Metadata};
use tracing::debug;

use super::Dialect;
use crate::assemble::AssembleOptions;
use crate::catalog::CatalogConnection;
use crate::error::Result;
use crate::introspector::{
    Introspector, RawColumn, RawTable, is_yes, query_columns, query_names, required, two_phase,
};
use crate::mapper::{ParsedType, TypeMapper};

const LIST_TABLES: &str = "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES ORDER BY TABLE_NAME";

const LIST_COLUMNS: &str = "SELECT COLUMN_NAME, IS_NULLABLE, DATA_TYPE \
     FROM INFORMATION_SCHEMA.COLUMNS \
     WHERE TABLE_NAME = @P1 \
     ORDER BY ORDINAL_POSITION";

/// SQL Server introspector and type mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mssql;

impl Mssql {
    fn list_columns(
        &self,
        conn: &mut dyn CatalogConnection,
        table: &str,
    ) -> Result<Vec<RawColumn>> {
        let context = format!("listing columns of [{}]", table);

        query_columns(conn, LIST_COLUMNS, &[table], &context, |row| {
            Ok(RawColumn::new(
                required(row, 0)?,
                required(row, 2)?,
                is_yes(row.text(1)),
            ))
        })
    }
}

impl Introspector for Mssql {
    fn dialect(&self) -> Dialect {
        Dialect::Mssql
    }

    fn introspect(&self, conn: &mut dyn CatalogConnection) -> Result<Vec<RawTable>> {
        let tables = query_names(conn, LIST_TABLES, &[], "listing tables")?;
        debug!(count = tables.len(), "Found SQL Server tables");

        two_phase(conn, tables, |conn, table| self.list_columns(conn, table))
    }
}

impl TypeMapper for Mssql {
    fn dialect(&self) -> Dialect {
        Dialect::Mssql
    }

    fn parse(&self, raw: &str) -> ParsedType {
        ParsedType::free_form(raw)
    }

    fn classify(&self, base: &str) -> CanonicalType {
        match base {
            "int" | "integer" | "tinyint" | "smallint" | "mediumint" | "bigint"
            | "unsigned big int" | "big int" | "int2" | "int8" => CanonicalType::Int64,
            "real" | "double" | "double precision" | "float" | "numeric" | "decimal" | "money"
            | "smallmoney" => CanonicalType::Float64,
            "bit" | "boolean" | "bool" => CanonicalType::Bool,
            "date" | "datetime" | "datetime2" | "smalldatetime" | "time" => {
                CanonicalType::Timestamp
            }
            "binary" | "varbinary" | "image" => CanonicalType::Bytes,
            "char" | "varchar" | "text" | "nchar" | "nvarchar" | "ntext" => CanonicalType::String,
            _ => CanonicalType::Unknown,
        }
    }
}

/// Introspect a SQL Server database and assemble the IR.
pub fn assemble(conn: &mut dyn CatalogConnection, options: &AssembleOptions) -> Result<Metadata> {
    Dialect::Mssql.assemble(conn, options)
}
