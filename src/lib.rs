//! Set-based column masking for table-to-table copies.
//!
//! Given a source table, a destination table, and a per-column masking
//! specification, this library assembles and executes a single
//! `INSERT INTO … SELECT …` statement that copies every row while
//! irreversibly redacting the governed columns. Structurally-required
//! columns (keys, non-sensitive fields) pass through unchanged.
//!
//! The library owns no connection management, scheduling, or table
//! lifecycle: callers hand in an already-connected [`MaskTarget`] and the
//! statement runs inside whatever transactional context that handle
//! carries.

pub mod dialect;
pub mod error;
pub mod executor;
pub mod mask;
pub mod models;

pub use dialect::Dialect;
pub use error::{MaskError, MaskResult};
pub use executor::{MaskTarget, MaskedCopy};
pub use mask::MaskPattern;
pub use mask::statement::build_statement;
pub use models::{ColumnSpec, TransformOutcome, TransformRequest};
