//! Error types for masked copies.
//!
//! This module defines all error types using `thiserror`. The taxonomy is
//! deliberately small: specification problems are caught before any SQL is
//! assembled, and everything the database raises during execution is
//! propagated as a single failure value with no retry or row-level recovery.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaskError {
    /// The masking specification itself is unusable: empty or duplicate
    /// columns, a declared column count that does not match, a rejected
    /// identifier, or an unknown pattern name.
    #[error("Specification error: {message}")]
    Specification { message: String },

    /// The database reported a failure while running the statement.
    #[error("Execution failed: {message}")]
    Execution {
        message: String,
        /// e.g. "42P01" for undefined table
        sql_state: Option<String>,
    },

    /// The connection itself failed (I/O, TLS, protocol, closed pool).
    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MaskError {
    /// Create a specification error.
    pub fn specification(message: impl Into<String>) -> Self {
        Self::Specification {
            message: message.into(),
        }
    }

    /// Create an execution error with an optional SQLSTATE code.
    pub fn execution(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::Execution {
            message: message.into(),
            sql_state,
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the SQLSTATE code reported by the engine, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Execution { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }
}

/// Convert sqlx errors to MaskError.
impl From<sqlx::Error> for MaskError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                MaskError::execution(db_err.message().to_string(), code)
            }
            sqlx::Error::Configuration(msg) => MaskError::connection(msg.to_string()),
            sqlx::Error::Io(io_err) => MaskError::connection(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => MaskError::connection(format!("TLS error: {}", tls_err)),
            sqlx::Error::Protocol(msg) => MaskError::connection(format!("Protocol error: {}", msg)),
            sqlx::Error::PoolTimedOut => {
                MaskError::connection("Connection pool acquire timed out")
            }
            sqlx::Error::PoolClosed => MaskError::connection("Connection pool is closed"),
            sqlx::Error::WorkerCrashed => MaskError::internal("Database worker crashed"),
            sqlx::Error::Decode(source) => {
                MaskError::internal(format!("Decode error: {}", source))
            }
            other => MaskError::internal(format!("Unexpected database error: {}", other)),
        }
    }
}

/// Result type alias for masked-copy operations.
pub type MaskResult<T> = Result<T, MaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MaskError::specification("no columns declared");
        assert!(err.to_string().contains("Specification error"));

        let err = MaskError::execution("relation does not exist", Some("42P01".to_string()));
        assert!(err.to_string().contains("Execution failed"));
    }

    #[test]
    fn test_sql_state_accessor() {
        let err = MaskError::execution("syntax error", Some("42601".to_string()));
        assert_eq!(err.sql_state(), Some("42601"));

        let err = MaskError::connection("refused");
        assert_eq!(err.sql_state(), None);
    }

    #[test]
    fn test_pool_closed_maps_to_connection() {
        let err: MaskError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, MaskError::Connection { .. }));
    }
}
