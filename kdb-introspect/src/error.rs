//! Error types for introspection.

use thiserror::Error;

use crate::catalog::{DriverError, QueryError};

/// Introspection error.
///
/// Any variant aborts the whole run. Unrecognized column types are not
/// errors; they map to [`kdb_ir::CanonicalType::Unknown`].
#[derive(Debug, Error)]
pub enum Error {
    /// The connection could not execute a query at all.
    #[error(transparent)]
    Connection {
        source: DriverError,
    },

    /// A table or column enumeration query failed.
    #[error("{context}: {source}")]
    CatalogQuery {
        context: String,
        #[source]
        source: DriverError,
    },

    /// A catalog row lacked a value the dialect always provides.
    #[error("{context}: catalog row has no value in column {column}")]
    MalformedRow { context: String, column: usize },
}

impl Error {
    /// Attribute a failed query to the catalog step that issued it.
    pub fn query(context: impl Into<String>, err: QueryError) -> Self {
        match err {
            QueryError::Connection(source) => Error::Connection { source },
            QueryError::Statement(source) => Error::CatalogQuery {
                context: context.into(),
                source,
            },
        }
    }

    pub fn malformed(context: impl Into<String>, column: usize) -> Self {
        Error::MalformedRow {
            context: context.into(),
            column,
        }
    }
}

/// Result type alias for introspection.
pub type Result<T> = std::result::Result<T, Error>;
