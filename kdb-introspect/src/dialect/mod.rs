//! Supported database dialects.
//!
//! Every dialect is a unit struct implementing both [`Introspector`] and
//! [`TypeMapper`]. [`Dialect`] selects one at runtime.

pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

use std::fmt;
use std::str::FromStr;

use kdb_ir::Metadata;
use thiserror::Error;

pub use mssql::Mssql;
pub use mysql::Mysql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use crate::assemble::{AssembleOptions, assemble};
use crate::catalog::CatalogConnection;
use crate::error::Result;
use crate::introspector::Introspector;
use crate::mapper::TypeMapper;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported database '{0}' (expected mysql, postgresql, sqlite3 or mssql)")]
pub struct DialectParseError(pub String);

/// A supported database product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Mysql,
    Postgres,
    Sqlite,
    Mssql,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Mysql,
        Dialect::Postgres,
        Dialect::Sqlite,
        Dialect::Mssql,
    ];

    /// Get the canonical identifier, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgres => "postgresql",
            Dialect::Sqlite => "sqlite3",
            Dialect::Mssql => "mssql",
        }
    }

    /// Human readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::Mysql => "MySQL",
            Dialect::Postgres => "PostgreSQL",
            Dialect::Sqlite => "SQLite",
            Dialect::Mssql => "SQL Server",
        }
    }

    pub fn introspector(&self) -> &'static dyn Introspector {
        match self {
            Dialect::Mysql => &Mysql,
            Dialect::Postgres => &Postgres,
            Dialect::Sqlite => &Sqlite,
            Dialect::Mssql => &Mssql,
        }
    }

    pub fn type_mapper(&self) -> &'static dyn TypeMapper {
        match self {
            Dialect::Mysql => &Mysql,
            Dialect::Postgres => &Postgres,
            Dialect::Sqlite => &Sqlite,
            Dialect::Mssql => &Mssql,
        }
    }

    /// Introspect `conn` with this dialect and assemble the IR.
    pub fn assemble(
        &self,
        conn: &mut dyn CatalogConnection,
        options: &AssembleOptions,
    ) -> Result<Metadata> {
        assemble(conn, self.introspector(), self.type_mapper(), options)
    }
}

impl FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::Mysql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgres),
            "sqlite3" | "sqlite" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::Mssql),
            _ => Err(DialectParseError(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap an identifier in `quote`, doubling any embedded quote characters.
pub(crate) fn quote_ident(name: &str, quote: char) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push(quote);
    for c in name.chars() {
        if c == quote {
            quoted.push(quote);
        }
        quoted.push(c);
    }
    quoted.push(quote);
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("sqlite3".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("sqlite".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("sqlserver".parse::<Dialect>().unwrap(), Dialect::Mssql);
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_round_trip_identifier() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.as_str().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_dispatch_matches_dialect() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.introspector().dialect(), dialect);
            assert_eq!(dialect.type_mapper().dialect(), dialect);
        }
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("foo", '`'), "`foo`");
        assert_eq!(quote_ident("we`ird", '`'), "`we``ird`");
    }
}
