//! Masked-copy execution.
//!
//! The entry point is [`MaskedCopy::run`]: resolve the dialect from the
//! target's driver name, assemble the statement, execute it once on the
//! caller's handle, and return the engine-reported row count.
//!
//! Execution is synchronous from the caller's point of view: one request
//! maps to exactly one statement on one caller-owned connection. The
//! library opens no transactions and applies no retries or timeouts; the
//! handle's lifecycle (commit, rollback, cancellation) belongs entirely to
//! the calling framework.

use crate::dialect::Dialect;
use crate::error::MaskResult;
use crate::mask::build_statement;
use crate::models::{TransformOutcome, TransformRequest};
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, SqlitePool};
use std::time::Instant;
use tracing::{debug, info};

/// An already-connected, already-authenticated execution target.
///
/// Implemented for the sqlx pools below; callers on other engines (e.g. a
/// tiberius SQL Server client) implement this themselves over their own
/// handle.
#[async_trait]
pub trait MaskTarget: Send {
    /// Driver name used for dialect resolution, e.g. `postgres` or `mssql`.
    fn driver_name(&self) -> &str;

    /// Execute one statement and return the engine-reported affected-row
    /// count. Runs inside the handle's existing transactional context.
    async fn execute_statement(&mut self, sql: &str) -> MaskResult<u64>;
}

#[async_trait]
impl MaskTarget for PgPool {
    fn driver_name(&self) -> &str {
        "postgres"
    }

    async fn execute_statement(&mut self, sql: &str) -> MaskResult<u64> {
        let result = sqlx::query(sql).execute(&*self).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MaskTarget for MySqlPool {
    fn driver_name(&self) -> &str {
        "mysql"
    }

    async fn execute_statement(&mut self, sql: &str) -> MaskResult<u64> {
        let result = sqlx::query(sql).execute(&*self).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl MaskTarget for SqlitePool {
    fn driver_name(&self) -> &str {
        "sqlite"
    }

    async fn execute_statement(&mut self, sql: &str) -> MaskResult<u64> {
        let result = sqlx::query(sql).execute(&*self).await?;
        Ok(result.rows_affected())
    }
}

/// Masked-copy runner.
///
/// Stateless apart from the fallback dialect, so one instance is safe to
/// share across callers on independent connections.
#[derive(Debug, Clone)]
pub struct MaskedCopy {
    default_dialect: Dialect,
}

impl MaskedCopy {
    /// Runner with the stock fallback dialect ([`Dialect::DEFAULT`]).
    pub fn new() -> Self {
        Self {
            default_dialect: Dialect::DEFAULT,
        }
    }

    /// Runner with a caller-injected fallback for unrecognized drivers.
    pub fn with_default_dialect(default_dialect: Dialect) -> Self {
        Self { default_dialect }
    }

    /// Assemble the statement for a request without executing it, for
    /// inspection or logging.
    pub fn statement(&self, request: &TransformRequest, dialect: Dialect) -> MaskResult<String> {
        build_statement(request, dialect)
    }

    /// Run one masked copy on the given target.
    ///
    /// Specification errors surface before any SQL reaches the database;
    /// execution errors propagate verbatim as a single failure with no
    /// partial retry or row skipping.
    pub async fn run<T: MaskTarget>(
        &self,
        target: &mut T,
        request: &TransformRequest,
    ) -> MaskResult<TransformOutcome> {
        let start = Instant::now();
        let dialect = Dialect::from_driver_name_or(target.driver_name(), self.default_dialect);
        let sql = build_statement(request, dialect)?;

        debug!(dialect = %dialect, sql = %sql, "Executing masked copy");

        let rows_written = target.execute_statement(&sql).await?;
        let execution_time_ms = start.elapsed().as_millis() as u64;

        info!(
            rows = rows_written,
            source = %request.source_table,
            destination = %request.destination_table,
            elapsed_ms = execution_time_ms,
            "Masked copy complete"
        );

        Ok(TransformOutcome {
            rows_written,
            execution_time_ms,
        })
    }
}

impl Default for MaskedCopy {
    fn default() -> Self {
        Self::new()
    }
}
