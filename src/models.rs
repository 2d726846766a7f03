//! Request and result models for masked copies.
//!
//! The types here are plain data: callers typically derive them from
//! declared dataset schemas in the surrounding orchestration framework, so
//! everything is serde-friendly.

use crate::error::{MaskError, MaskResult};
use crate::mask::MaskPattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One output column: either masked with a pattern or copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name; must exist in both source and destination schemas.
    pub name: String,
    /// Masking pattern, or `None` for a pass-through column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<MaskPattern>,
}

impl ColumnSpec {
    /// A column masked with the given pattern.
    pub fn masked(name: impl Into<String>, pattern: MaskPattern) -> Self {
        Self {
            name: name.into(),
            pattern: Some(pattern),
        }
    }

    /// A column copied from source to destination unchanged. Primary-key
    /// and join-key columns must always be declared this way; masking a
    /// lookup key breaks referential usability of the output.
    pub fn pass_through(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
        }
    }

    /// Whether this column is masked.
    pub fn is_masked(&self) -> bool {
        self.pattern.is_some()
    }
}

/// A complete masked-copy request.
///
/// Column order determines the column order in the generated statement and
/// must exactly match the destination table's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformRequest {
    /// Fully-resolved source table name (schema prefix already applied).
    pub source_table: String,
    /// Fully-resolved destination table name.
    pub destination_table: String,
    /// Ordered output column specifications.
    pub columns: Vec<ColumnSpec>,
    /// Declared destination column count, when the caller knows it from
    /// schema metadata. Checked against `columns.len()` during validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_columns: Option<usize>,
}

impl TransformRequest {
    /// Create a request for the given tables and column specs.
    pub fn new(
        source_table: impl Into<String>,
        destination_table: impl Into<String>,
        columns: Vec<ColumnSpec>,
    ) -> Self {
        Self {
            source_table: source_table.into(),
            destination_table: destination_table.into(),
            columns,
            expected_columns: None,
        }
    }

    /// Declare the destination table's column count for validation.
    pub fn with_expected_columns(mut self, count: usize) -> Self {
        self.expected_columns = Some(count);
        self
    }

    /// Validate the request before any SQL is assembled.
    ///
    /// Checks: at least one column, no duplicate column names, the declared
    /// column count (when present), and identifier hardening. Identifiers
    /// containing quote or bracket characters, semicolons, or control
    /// characters are rejected even though they are expected to come from
    /// trusted schema metadata.
    pub fn validate(&self) -> MaskResult<()> {
        if self.columns.is_empty() {
            return Err(MaskError::specification("no columns declared"));
        }

        if let Some(expected) = self.expected_columns {
            if expected != self.columns.len() {
                return Err(MaskError::specification(format!(
                    "column count mismatch: request has {} columns, destination declares {}",
                    self.columns.len(),
                    expected
                )));
            }
        }

        check_identifier("source table", &self.source_table)?;
        check_identifier("destination table", &self.destination_table)?;

        let mut seen = HashSet::new();
        for column in &self.columns {
            check_identifier("column", &column.name)?;
            if !seen.insert(column.name.as_str()) {
                return Err(MaskError::specification(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }

        Ok(())
    }
}

/// Result of a successful masked copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutcome {
    /// Engine-reported number of rows written to the destination.
    pub rows_written: u64,
    /// Wall-clock execution time in milliseconds.
    pub execution_time_ms: u64,
}

/// Characters that would break out of quoted identifiers in either dialect.
const REJECTED_IDENT_CHARS: &[char] = &['"', '[', ']', '`', '\'', ';', '\\'];

fn check_identifier(kind: &str, name: &str) -> MaskResult<()> {
    if name.is_empty() {
        return Err(MaskError::specification(format!("empty {} name", kind)));
    }
    if name
        .chars()
        .any(|c| c.is_control() || REJECTED_IDENT_CHARS.contains(&c))
    {
        return Err(MaskError::specification(format!(
            "{} name '{}' contains characters not allowed in identifiers",
            kind, name
        )));
    }
    Ok(())
}
