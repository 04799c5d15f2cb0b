//! MySQL / MariaDB.
//!
//! Tables come from `SHOW TABLES` in storage order, columns from
//! `SHOW COLUMNS FROM`, which returns `Field, Type, Null, Key, Default,
//! Extra`. Only the name, type and nullability are read.

use kdb_ir::{CanonicalType, Metadata};
use tracing::debug;

use super::{Dialect, quote_ident};
use crate::assemble::AssembleOptions;
use crate::catalog::CatalogConnection;
use crate::error::Result;
use crate::introspector::{
    Introspector, RawColumn, RawTable, is_yes, query_columns, query_names, required, two_phase,
};
use crate::mapper::{ParsedType, TypeMapper};

const LIST_TABLES: &str = "SHOW TABLES";

/// MySQL introspector and type mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mysql;

impl Mysql {
    fn list_columns(
        &self,
        conn: &mut dyn CatalogConnection,
        table: &str,
    ) -> Result<Vec<RawColumn>> {
        let sql = format!("SHOW COLUMNS FROM {}", quote_ident(table, '`'));
        let context = format!("listing columns of `{}`", table);

        query_columns(conn, &sql, &[], &context, |row| {
            Ok(RawColumn::new(
                required(row, 0)?,
                required(row, 1)?,
                is_yes(row.text(2)),
            ))
        })
    }
}

impl Introspector for Mysql {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn introspect(&self, conn: &mut dyn CatalogConnection) -> Result<Vec<RawTable>> {
        let tables = query_names(conn, LIST_TABLES, &[], "listing tables")?;
        debug!(count = tables.len(), "Found MySQL tables");

        two_phase(conn, tables, |conn, table| self.list_columns(conn, table))
    }
}

impl TypeMapper for Mysql {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn parse(&self, raw: &str) -> ParsedType {
        ParsedType::positional(raw)
    }

    fn classify(&self, base: &str) -> CanonicalType {
        match base {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" => {
                CanonicalType::Int64
            }
            "decimal" | "float" | "double" => CanonicalType::Float64,
            "blob" | "tinyblob" | "mediumblob" | "longblob" | "binary" | "varbinary" => {
                CanonicalType::Bytes
            }
            "datetime" | "timestamp" | "date" => CanonicalType::Timestamp,
            "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "enum"
            | "set" => CanonicalType::String,
            _ => CanonicalType::Unknown,
        }
    }
}

/// Introspect a MySQL database and assemble the IR.
pub fn assemble(conn: &mut dyn CatalogConnection, options: &AssembleOptions) -> Result<Metadata> {
    Dialect::Mysql.assemble(conn, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRow, CatalogValue};
    use crate::testing::FakeCatalog;

    #[test]
    fn test_required_vocabulary() {
        let cases = [
            ("tinyint", CanonicalType::Int64),
            ("smallint", CanonicalType::Int64),
            ("mediumint", CanonicalType::Int64),
            ("int", CanonicalType::Int64),
            ("bigint", CanonicalType::Int64),
            ("decimal", CanonicalType::Float64),
            ("float", CanonicalType::Float64),
            ("double", CanonicalType::Float64),
            ("blob", CanonicalType::Bytes),
            ("tinyblob", CanonicalType::Bytes),
            ("mediumblob", CanonicalType::Bytes),
            ("longblob", CanonicalType::Bytes),
            ("datetime", CanonicalType::Timestamp),
            ("varchar", CanonicalType::String),
        ];
        for (raw, expected) in cases {
            assert_eq!(Mysql.map_type(raw), expected, "{raw}");
        }
    }

    #[test]
    fn test_precision_and_sign_are_stripped() {
        assert_eq!(Mysql.map_type("INT(11) unsigned"), CanonicalType::Int64);
        assert_eq!(Mysql.map_type("decimal(10,2)"), CanonicalType::Float64);
        assert_eq!(Mysql.map_type("varchar(255)"), CanonicalType::String);
        assert!(Mysql.parse("int(10) unsigned").is_unsigned());
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(Mysql.map_type("geometry"), CanonicalType::Unknown);
        assert_eq!(Mysql.map_type(""), CanonicalType::Unknown);
    }

    #[test]
    fn test_introspect_reads_show_columns() {
        let mut conn = FakeCatalog::new()
            .on("SHOW TABLES", vec![CatalogRow::texts(&["users"])])
            .on(
                "SHOW COLUMNS FROM `users`",
                vec![
                    CatalogRow::new(vec![
                        "id".into(),
                        "int(11) unsigned".into(),
                        "NO".into(),
                        "PRI".into(),
                        CatalogValue::Null,
                        "auto_increment".into(),
                    ]),
                    CatalogRow::new(vec![
                        "email".into(),
                        "varchar(255)".into(),
                        "YES".into(),
                        "".into(),
                        CatalogValue::Null,
                        "".into(),
                    ]),
                ],
            );

        let tables = Mysql.introspect(&mut conn).unwrap();

        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].name, "users");
        assert_eq!(
            tables[0].columns,
            vec![
                RawColumn::new("id", "int(11) unsigned", false),
                RawColumn::new("email", "varchar(255)", true),
            ]
        );
    }
}
