//! Masked-copy statement assembly.
//!
//! Produces one `INSERT INTO <dest> (<cols>) SELECT <exprs> FROM <source>`
//! statement: a set-based bulk operation that transforms every qualifying
//! row in a single engine-side pass, with no client-side iteration.

use crate::dialect::Dialect;
use crate::error::MaskResult;
use crate::models::TransformRequest;

/// Assemble the full masked-copy statement for a request.
///
/// The request is validated first; specification errors surface before any
/// SQL is produced. Masked columns substitute their pattern expression,
/// pass-through columns substitute the quoted column reference unchanged.
/// Assembly is deterministic: identical requests against the same dialect
/// produce byte-identical SQL.
pub fn build_statement(request: &TransformRequest, dialect: Dialect) -> MaskResult<String> {
    request.validate()?;

    let destination = dialect.quote_table(&request.destination_table);
    let source = dialect.quote_table(&request.source_table);

    let column_list = request
        .columns
        .iter()
        .map(|c| dialect.quote_ident(&c.name))
        .collect::<Vec<_>>()
        .join(", ");

    let select_list = request
        .columns
        .iter()
        .map(|c| {
            let quoted = dialect.quote_ident(&c.name);
            match c.pattern {
                Some(pattern) => {
                    format!("{} AS {}", pattern.expression(&c.name, dialect), quoted)
                }
                None => quoted,
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "INSERT INTO {destination} ({column_list}) SELECT {select_list} FROM {source}"
    ))
}
