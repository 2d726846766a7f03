//! Masking rule engine.
//!
//! Maps a column name and a declared masking pattern to a dialect-specific
//! SQL scalar expression, and assembles the full `INSERT INTO … SELECT`
//! statement that performs the masked copy in one set-based pass. Both
//! halves are pure functions: the same inputs always produce the same SQL.

pub mod pattern;
pub mod statement;

pub use pattern::MaskPattern;
pub use statement::build_statement;
