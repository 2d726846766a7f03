//! Masking patterns and their per-dialect SQL expression templates.
//!
//! Each pattern is a fixed, hand-authored redaction rule. Dispatch is a
//! closed match over `(pattern, dialect)` to a template function, so adding
//! a pattern means adding a variant and its arms without touching call
//! sites.
//!
//! Every template is NULL-preserving: a NULL input always yields NULL
//! output, never an empty string or a literal mask placeholder.
//!
//! Both dialects use `RIGHT(col, n)` for the "show last n characters"
//! window. `RIGHT` saturates at the string length on PostgreSQL and SQL
//! Server alike, so inputs shorter than the window behave identically
//! across engines.

use crate::dialect::Dialect;
use crate::error::MaskError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named, fixed rule for irreversibly redacting a column's value while
/// preserving partial structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskPattern {
    /// `'***'` + last 2 characters. Keeps the tail for recognizability
    /// while hiding most of the value.
    Name,
    /// `'***-***-'` + last 4 characters, the common phone convention.
    Phone,
    /// `'***'` + last 3 characters.
    Id,
    /// First 3 characters + `'***@'` + the domain after `@`. NULL when the
    /// input has no `@` or fewer than 3 characters before it, so non-email
    /// strings never produce malformed output.
    Email,
}

impl MaskPattern {
    /// Pattern name as used in declarative masking specs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Id => "id",
            Self::Email => "email",
        }
    }

    /// Build the SQL scalar expression that masks `column` under this
    /// pattern for the given dialect.
    ///
    /// Pure: the same `(pattern, dialect)` always yields the same fragment
    /// apart from the bound column name. The result is an expression, not a
    /// statement; it evaluates to the masked value or NULL per row.
    pub fn expression(&self, column: &str, dialect: Dialect) -> String {
        let quoted = dialect.quote_ident(column);
        match (self, dialect) {
            (Self::Name, _) => reveal_suffix(&quoted, "***", 2, dialect),
            (Self::Phone, _) => reveal_suffix(&quoted, "***-***-", 4, dialect),
            (Self::Id, _) => reveal_suffix(&quoted, "***", 3, dialect),
            (Self::Email, Dialect::Postgres) => email_postgres(&quoted),
            (Self::Email, Dialect::SqlServer) => email_sqlserver(&quoted),
        }
    }
}

impl FromStr for MaskPattern {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "phone" => Ok(Self::Phone),
            "id" => Ok(Self::Id),
            "email" => Ok(Self::Email),
            other => Err(MaskError::specification(format!(
                "unknown mask pattern '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal prefix + the last `keep` characters of the input.
fn reveal_suffix(quoted: &str, prefix: &str, keep: u32, dialect: Dialect) -> String {
    let op = dialect.concat_op();
    format!(
        "CASE WHEN {quoted} IS NOT NULL THEN '{prefix}' {op} RIGHT({quoted}, {keep}) ELSE NULL END"
    )
}

fn email_postgres(quoted: &str) -> String {
    format!(
        "CASE WHEN {quoted} IS NOT NULL AND {quoted} LIKE '%@%' AND POSITION('@' IN {quoted}) > 3 \
         THEN LEFT({quoted}, 3) || '***@' || SPLIT_PART({quoted}, '@', 2) \
         ELSE NULL END"
    )
}

fn email_sqlserver(quoted: &str) -> String {
    format!(
        "CASE WHEN {quoted} IS NOT NULL AND {quoted} LIKE '%@%' AND CHARINDEX('@', {quoted}) > 3 \
         THEN LEFT({quoted}, 3) + '***@' + \
         SUBSTRING({quoted}, CHARINDEX('@', {quoted}) + 1, LEN({quoted}) - CHARINDEX('@', {quoted})) \
         ELSE NULL END"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_expression_postgres() {
        assert_eq!(
            MaskPattern::Name.expression("firstname", Dialect::Postgres),
            "CASE WHEN \"firstname\" IS NOT NULL THEN '***' || RIGHT(\"firstname\", 2) ELSE NULL END"
        );
    }

    #[test]
    fn test_name_expression_sqlserver() {
        assert_eq!(
            MaskPattern::Name.expression("firstname", Dialect::SqlServer),
            "CASE WHEN [firstname] IS NOT NULL THEN '***' + RIGHT([firstname], 2) ELSE NULL END"
        );
    }

    #[test]
    fn test_phone_and_id_prefixes() {
        for dialect in [Dialect::Postgres, Dialect::SqlServer] {
            let phone = MaskPattern::Phone.expression("phone", dialect);
            assert!(phone.contains("'***-***-'"));
            assert!(phone.contains(", 4)"));

            let id = MaskPattern::Id.expression("addr", dialect);
            assert!(id.contains("'***'"));
            assert!(id.contains(", 3)"));
        }
    }

    #[test]
    fn test_email_expression_postgres() {
        let sql = MaskPattern::Email.expression("email", Dialect::Postgres);
        assert!(sql.contains("POSITION('@' IN \"email\") > 3"));
        assert!(sql.contains("SPLIT_PART(\"email\", '@', 2)"));
        assert!(sql.contains("'***@'"));
    }

    #[test]
    fn test_email_expression_sqlserver() {
        let sql = MaskPattern::Email.expression("email", Dialect::SqlServer);
        assert!(sql.contains("CHARINDEX('@', [email]) > 3"));
        assert!(sql.contains("LEFT([email], 3)"));
        assert!(sql.contains("LEN([email])"));
    }

    #[test]
    fn test_all_patterns_null_preserving() {
        for pattern in [
            MaskPattern::Name,
            MaskPattern::Phone,
            MaskPattern::Id,
            MaskPattern::Email,
        ] {
            for dialect in [Dialect::Postgres, Dialect::SqlServer] {
                let sql = pattern.expression("col", dialect);
                assert!(
                    sql.starts_with("CASE WHEN") && sql.contains("IS NOT NULL"),
                    "{pattern}/{dialect} must guard on NULL: {sql}"
                );
                assert!(
                    sql.ends_with("ELSE NULL END"),
                    "{pattern}/{dialect} must yield NULL for NULL input: {sql}"
                );
            }
        }
    }

    #[test]
    fn test_expression_is_deterministic() {
        let a = MaskPattern::Email.expression("email", Dialect::Postgres);
        let b = MaskPattern::Email.expression("email", Dialect::Postgres);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pattern_from_str() {
        assert_eq!("name".parse::<MaskPattern>().unwrap(), MaskPattern::Name);
        assert_eq!("EMAIL".parse::<MaskPattern>().unwrap(), MaskPattern::Email);
        let err = "ssn".parse::<MaskPattern>().unwrap_err();
        assert!(err.to_string().contains("unknown mask pattern 'ssn'"));
    }

    #[test]
    fn test_pattern_serde_lowercase() {
        assert_eq!(serde_json::to_string(&MaskPattern::Phone).unwrap(), "\"phone\"");
        let p: MaskPattern = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(p, MaskPattern::Email);
    }
}
