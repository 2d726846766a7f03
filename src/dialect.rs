//! SQL dialect adapter.
//!
//! Abstracts identifier quoting and string-function syntax differences
//! between target engines. Dialect resolution is a total function:
//! unrecognized driver names resolve to a fallback dialect instead of
//! failing, with PostgreSQL syntax as the stock fallback since it is the
//! closest to standard SQL.

use serde::{Deserialize, Serialize};

/// Target SQL engine syntax variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Double-quoted identifiers, `||` concatenation. Also covers engines
    /// that accept standard-SQL syntax (SQLite, MySQL in ANSI mode).
    Postgres,
    /// Bracket-quoted identifiers, `+` concatenation.
    SqlServer,
}

impl Dialect {
    /// Fallback used when a driver name matches no known dialect.
    pub const DEFAULT: Dialect = Dialect::Postgres;

    /// Resolve a dialect from a driver or dialect name.
    ///
    /// Case-insensitive substring match: anything containing `postgres`
    /// resolves to [`Dialect::Postgres`], anything containing `mssql` or
    /// `sqlserver` resolves to [`Dialect::SqlServer`], and everything else
    /// falls back to [`Dialect::DEFAULT`]. Never fails.
    pub fn from_driver_name(name: &str) -> Dialect {
        Self::from_driver_name_or(name, Self::DEFAULT)
    }

    /// Resolve a dialect with a caller-supplied fallback.
    ///
    /// The fallback is an explicit policy knob rather than a hardwired
    /// branch, so environments with additional engines can override it.
    pub fn from_driver_name_or(name: &str, default: Dialect) -> Dialect {
        let lower = name.to_lowercase();
        if lower.contains("postgres") {
            Dialect::Postgres
        } else if lower.contains("mssql") || lower.contains("sqlserver") {
            Dialect::SqlServer
        } else {
            default
        }
    }

    /// Quote a column identifier.
    ///
    /// Embedded quote characters are not escaped; identifiers are expected
    /// to originate from governed schema metadata, and hostile characters
    /// are rejected up front by request validation.
    pub fn quote_ident(&self, name: &str) -> String {
        match self {
            Dialect::Postgres => format!("\"{name}\""),
            Dialect::SqlServer => format!("[{name}]"),
        }
    }

    /// Quote a fully-resolved table name (any schema prefix already applied).
    pub fn quote_table(&self, name: &str) -> String {
        self.quote_ident(name)
    }

    /// String concatenation operator for this dialect.
    pub(crate) fn concat_op(&self) -> &'static str {
        match self {
            Dialect::Postgres => "||",
            Dialect::SqlServer => "+",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::SqlServer => write!(f, "sqlserver"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_driver_names() {
        assert_eq!(Dialect::from_driver_name("postgres"), Dialect::Postgres);
        assert_eq!(Dialect::from_driver_name("PostgreSQL"), Dialect::Postgres);
        assert_eq!(
            Dialect::from_driver_name("postgresql+psycopg2"),
            Dialect::Postgres
        );
    }

    #[test]
    fn test_sqlserver_driver_names() {
        assert_eq!(Dialect::from_driver_name("mssql"), Dialect::SqlServer);
        assert_eq!(
            Dialect::from_driver_name("mssql+pyodbc"),
            Dialect::SqlServer
        );
        assert_eq!(Dialect::from_driver_name("SqlServer"), Dialect::SqlServer);
    }

    #[test]
    fn test_unknown_driver_falls_back_to_default() {
        assert_eq!(Dialect::from_driver_name("mysql"), Dialect::DEFAULT);
        assert_eq!(Dialect::from_driver_name("sqlite"), Dialect::DEFAULT);
        assert_eq!(Dialect::from_driver_name(""), Dialect::DEFAULT);
    }

    #[test]
    fn test_injectable_fallback() {
        assert_eq!(
            Dialect::from_driver_name_or("oracle", Dialect::SqlServer),
            Dialect::SqlServer
        );
        // A recognized name still wins over the injected fallback
        assert_eq!(
            Dialect::from_driver_name_or("postgres", Dialect::SqlServer),
            Dialect::Postgres
        );
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(Dialect::Postgres.quote_ident("firstname"), "\"firstname\"");
        assert_eq!(Dialect::SqlServer.quote_ident("firstname"), "[firstname]");
    }

    #[test]
    fn test_quote_table() {
        assert_eq!(
            Dialect::Postgres.quote_table("dt_masked_customers"),
            "\"dt_masked_customers\""
        );
        assert_eq!(
            Dialect::SqlServer.quote_table("dt_masked_customers"),
            "[dt_masked_customers]"
        );
    }
}
