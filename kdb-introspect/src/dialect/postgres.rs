//! PostgreSQL.
//!
//! A single joined query against `information_schema` returns every column
//! of every base table outside the system schemas, ordered by schema, table
//! and ordinal position. Tables are split out of that stream by watching for
//! a change of `(schema, table)` between consecutive rows, which relies on
//! the `ORDER BY` keeping each table's rows contiguous.

use kdb_ir::{CanonicalType, Metadata};
use tracing::debug;

use super::Dialect;
use crate::assemble::AssembleOptions;
use crate::catalog::CatalogConnection;
use crate::error::{Error, Result};
use crate::introspector::{Introspector, RawColumn, RawTable, is_yes};
use crate::mapper::{ParsedType, TypeMapper};

// information_schema exposes domain types (sql_identifier, character_data);
// cast to text so every driver decodes them as strings.
const LIST_COLUMNS: &str = r#"SELECT
    columns.table_schema::text,
    columns.table_name::text,
    columns.column_name::text,
    columns.data_type::text,
    columns.is_nullable::text
FROM
    information_schema.columns
INNER JOIN
    information_schema.tables
ON
    columns.table_schema = tables.table_schema
AND
    columns.table_name = tables.table_name
WHERE
    tables.table_type = 'BASE TABLE'
AND
    tables.table_schema NOT IN ('pg_catalog', 'information_schema')
ORDER BY
    columns.table_schema, columns.table_name, columns.ordinal_position"#;

const CONTEXT: &str = "listing columns";

/// PostgreSQL introspector and type mapper.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Introspector for Postgres {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn introspect(&self, conn: &mut dyn CatalogConnection) -> Result<Vec<RawTable>> {
        let rows = conn
            .query_rows(LIST_COLUMNS, &[])
            .map_err(|e| Error::query(CONTEXT, e))?;

        let mut tables: Vec<RawTable> = Vec::new();
        let mut current_schema: Option<String> = None;

        for row in &rows {
            let text = |index: usize| {
                row.text(index)
                    .ok_or_else(|| Error::malformed(CONTEXT, index))
            };
            let schema = text(0)?;
            let table = text(1)?;
            let column = RawColumn::new(text(2)?, text(3)?, is_yes(row.text(4)));

            let same_table = current_schema.as_deref() == Some(schema)
                && tables.last().is_some_and(|t| t.name == table);
            if !same_table {
                current_schema = Some(schema.to_string());
                tables.push(RawTable {
                    name: table.to_string(),
                    columns: Vec::new(),
                });
            }

            if let Some(last) = tables.last_mut() {
                last.columns.push(column);
            }
        }

        debug!(
            count = tables.len(),
            columns = rows.len(),
            "Found PostgreSQL tables"
        );
        Ok(tables)
    }
}

impl TypeMapper for Postgres {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn parse(&self, raw: &str) -> ParsedType {
        ParsedType::bare(raw)
    }

    fn classify(&self, base: &str) -> CanonicalType {
        match base {
            "bigint" | "integer" | "numeric" | "smallint" => CanonicalType::Int64,
            "double precision" => CanonicalType::Float64,
            "real" => CanonicalType::Float32,
            "boolean" => CanonicalType::Bool,
            "bytea" => CanonicalType::Bytes,
            "date"
            | "time"
            | "time with time zone"
            | "time without time zone"
            | "timestamp"
            | "timestamp with time zone"
            | "timestamp without time zone" => CanonicalType::Timestamp,
            "character varying" | "character" | "text" => CanonicalType::String,
            _ => CanonicalType::Unknown,
        }
    }
}

/// Introspect a PostgreSQL database and assemble the IR.
pub fn assemble(conn: &mut dyn CatalogConnection, options: &AssembleOptions) -> Result<Metadata> {
    Dialect::Postgres.assemble(conn, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogRow;
    use crate::testing::FakeCatalog;

    fn column(schema: &str, table: &str, name: &str, ty: &str, nullable: &str) -> CatalogRow {
        CatalogRow::texts(&[schema, table, name, ty, nullable])
    }

    #[test]
    fn test_required_vocabulary() {
        let cases = [
            ("bigint", CanonicalType::Int64),
            ("integer", CanonicalType::Int64),
            ("numeric", CanonicalType::Int64),
            ("smallint", CanonicalType::Int64),
            ("double precision", CanonicalType::Float64),
            ("real", CanonicalType::Float32),
            ("boolean", CanonicalType::Bool),
            ("bytea", CanonicalType::Bytes),
            ("date", CanonicalType::Timestamp),
            ("time", CanonicalType::Timestamp),
            ("time with time zone", CanonicalType::Timestamp),
            ("time without time zone", CanonicalType::Timestamp),
            ("timestamp", CanonicalType::Timestamp),
            ("timestamp with time zone", CanonicalType::Timestamp),
            ("timestamp without time zone", CanonicalType::Timestamp),
            ("character varying", CanonicalType::String),
            ("character", CanonicalType::String),
            ("text", CanonicalType::String),
        ];
        for (raw, expected) in cases {
            assert_eq!(Postgres.map_type(raw), expected, "{raw}");
        }
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(Postgres.map_type("uuid"), CanonicalType::Unknown);
        assert_eq!(Postgres.map_type("USER-DEFINED"), CanonicalType::Unknown);
        assert_eq!(Postgres.map_type("ARRAY"), CanonicalType::Unknown);
    }

    #[test]
    fn test_groups_contiguous_rows() {
        let mut conn = FakeCatalog::new().on(
            "information_schema.columns",
            vec![
                column("public", "accounts", "id", "integer", "NO"),
                column("public", "accounts", "name", "text", "YES"),
                column("public", "posts", "id", "bigint", "NO"),
                column("public", "posts", "body", "text", "YES"),
                column("public", "posts", "score", "real", "YES"),
            ],
        );

        let tables = Postgres.introspect(&mut conn).unwrap();

        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["accounts", "posts"]);
        assert_eq!(tables[0].columns.len(), 2);
        assert_eq!(
            tables[1].columns,
            vec![
                RawColumn::new("id", "bigint", false),
                RawColumn::new("body", "text", true),
                RawColumn::new("score", "real", true),
            ]
        );
        assert_eq!(conn.queries().len(), 1);
    }

    #[test]
    fn test_same_table_name_in_adjacent_schemas() {
        let mut conn = FakeCatalog::new().on(
            "information_schema.columns",
            vec![
                column("audit", "events", "id", "integer", "NO"),
                column("public", "events", "id", "bigint", "NO"),
            ],
        );

        let tables = Postgres.introspect(&mut conn).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].columns[0].raw_type, "integer");
        assert_eq!(tables[1].columns[0].raw_type, "bigint");
    }

    #[test]
    fn test_empty_schema() {
        let mut conn = FakeCatalog::new().on("information_schema.columns", vec![]);
        assert!(Postgres.introspect(&mut conn).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row() {
        let mut conn = FakeCatalog::new().on(
            "information_schema.columns",
            vec![CatalogRow::texts(&["public", "t"])],
        );

        let err = Postgres.introspect(&mut conn).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { column: 2, .. }));
    }
}
