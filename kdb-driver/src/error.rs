//! Error types for opening connections.

use kdb_introspect::{Dialect, DriverError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The blocking runtime could not be started.
    #[error("failed to start database runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The connection string was rejected before connecting.
    #[error("invalid {} connection string: {source}", dialect.display_name())]
    ConnectionString {
        dialect: Dialect,
        #[source]
        source: DriverError,
    },

    /// Connecting or authenticating failed.
    #[error("failed to connect to {}: {source}", dialect.display_name())]
    Connect {
        dialect: Dialect,
        #[source]
        source: DriverError,
    },
}

impl Error {
    pub(crate) fn connection_string(dialect: Dialect, source: impl Into<DriverError>) -> Self {
        Error::ConnectionString {
            dialect,
            source: source.into(),
        }
    }

    pub(crate) fn connect(dialect: Dialect, source: impl Into<DriverError>) -> Self {
        Error::Connect {
            dialect,
            source: source.into(),
        }
    }
}

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;
