//! Statement splitting via the sqlparser tokenizer.
//!
//! The engine never interprets migration SQL; it only needs statement
//! boundaries so a failure can be reported with a statement index and so
//! each statement executes in its written order. Splitting on raw `;` would
//! break on semicolons inside string literals, dollar-quoted bodies, and
//! comments, so the source is tokenized first and split at top-level
//! semicolon tokens only.

use crate::error::{StoreError, StoreResult};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Split a unit's source into individual statements.
///
/// `origin` labels the unit in error messages (file path or embedded label).
/// Fragments containing only whitespace and comments are dropped; everything
/// else is preserved verbatim, trimmed of surrounding whitespace.
pub fn split_statements(origin: &str, sql: &str) -> StoreResult<Vec<String>> {
    let dialect = DuckDbDialect {};
    let tokens = Tokenizer::new(&dialect, sql)
        .tokenize()
        .map_err(|e| StoreError::MalformedUnit {
            unit: origin.to_string(),
            message: format!("tokenizer error: {e}"),
        })?;

    let mut statements = Vec::new();
    let mut current = String::new();
    let mut has_content = false;

    for token in tokens {
        match token {
            Token::SemiColon => {
                if has_content {
                    statements.push(current.trim().to_string());
                }
                current.clear();
                has_content = false;
            }
            Token::Whitespace(_) => current.push_str(&token.to_string()),
            _ => {
                has_content = true;
                current.push_str(&token.to_string());
            }
        }
    }
    if has_content {
        statements.push(current.trim().to_string());
    }

    Ok(statements)
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
