//! SQL literal escaping for engine-generated statements.
//!
//! Migration statements themselves are issued verbatim; only the engine's
//! own ledger and lock statements interpolate values, and every interpolated
//! value passes through here.

/// Escape a SQL string literal value by doubling single quotes.
///
/// For use inside single-quoted SQL string literals, not identifiers.
///
/// # Examples
/// ```
/// use sm_core::sql_utils::escape_literal;
/// assert_eq!(escape_literal("add_index"), "add_index");
/// assert_eq!(escape_literal("it's"), "it''s");
/// ```
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
