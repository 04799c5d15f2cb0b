//! SQLite.
//!
//! Tables come from `sqlite_master`, columns from `PRAGMA TABLE_INFO`, which
//! returns `cid, name, type, notnull, dflt_value, pk`. SQLite accepts almost
//! any declared type text, so parsing is free-form.

use kdb_ir::{CanonicalType, Metadata};
use tracing::debug;

use super::{Dialect, quote_ident};
use crate::assemble::AssembleOptions;
use crate::catalog::CatalogConnection;
use crate::error::Result;
use crate::introspector::{
    Introspector, RawColumn, RawTable, query_columns, query_names, required, two_phase,
};
use crate::mapper::{ParsedType, TypeMapper};

const LIST_TABLES: &str = "SELECT tbl_name FROM sqlite_master WHERE type = ?";

/// Prefix of tables SQLite creates for itself (e.g. `sqlite_sequence`).
const INTERNAL_PREFIX: &str = "sqlite_";

/// SQLite introspector and type mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Sqlite {
    fn list_columns(
        &self,
        conn: &mut dyn CatalogConnection,
        table: &str,
    ) -> Result<Vec<RawColumn>> {
        let sql = format!("PRAGMA TABLE_INFO({})", quote_ident(table, '`'));
        let context = format!("listing columns of `{}`", table);

        query_columns(conn, &sql, &[], &context, |row| {
            // Columns declared without a type report an empty string.
            let raw_type = row.text(2).unwrap_or_default();
            Ok(RawColumn::new(
                required(row, 1)?,
                raw_type,
                row.int(3) == Some(0),
            ))
        })
    }
}

impl Introspector for Sqlite {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn introspect(&self, conn: &mut dyn CatalogConnection) -> Result<Vec<RawTable>> {
        let mut tables = query_names(conn, LIST_TABLES, &["table"], "listing tables")?;
        tables.retain(|name| !name.starts_with(INTERNAL_PREFIX));
        debug!(count = tables.len(), "Found SQLite tables");

        two_phase(conn, tables, |conn, table| self.list_columns(conn, table))
    }
}

impl TypeMapper for Sqlite {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn parse(&self, raw: &str) -> ParsedType {
        ParsedType::free_form(raw)
    }

    fn classify(&self, base: &str) -> CanonicalType {
        match base {
            "int" | "integer" | "tinyint" | "smallint" | "mediumint" | "bigint"
            | "unsigned big int" | "big int" | "int2" | "int8" => CanonicalType::Int64,
            "real" | "double" | "double precision" | "float" | "numeric" | "decimal" => {
                CanonicalType::Float64
            }
            "bit" | "boolean" | "bool" => CanonicalType::Bool,
            "date" | "datetime" => CanonicalType::Timestamp,
            "blob" => CanonicalType::Bytes,
            "text" | "clob" | "char" | "character" | "varchar" | "varying character" | "nchar"
            | "native character" | "nvarchar" => CanonicalType::String,
            _ => CanonicalType::Unknown,
        }
    }
}

/// Introspect a SQLite database and assemble the IR.
pub fn assemble(conn: &mut dyn CatalogConnection, options: &AssembleOptions) -> Result<Metadata> {
    Dialect::Sqlite.assemble(conn, options)
}
