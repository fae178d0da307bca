//! SQL to token tree.
//!
//! Tokenization is delegated to `sqlparser`'s tokenizer for the selected
//! dialect. The flat token stream is then grouped into parentheses, function
//! calls and identifiers so the rewriter can reason about qualifiers and
//! aliases. No statement is validated: anything the tokenizer accepts yields a
//! tree that prints back to the input unchanged.

mod grouping;
mod lexer;
pub mod naming;

use std::fmt;

use crate::error::ParseError;
use crate::token::{tokens_to_string, SqlToken};
use crate::types::Dialect;

pub use lexer::RESERVED_KEYWORDS;

/// A tokenized SQL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    tokens: Vec<SqlToken>,
    statement_count: usize,
}

impl Statement {
    /// Top-level tokens of the tree.
    pub fn tokens(&self) -> &[SqlToken] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<SqlToken> {
        self.tokens
    }

    /// Number of non-empty `;`-separated statements in the input.
    pub fn statement_count(&self) -> usize {
        self.statement_count
    }

    /// True when the input holds nothing but whitespace, comments and `;`.
    pub fn is_empty(&self) -> bool {
        self.statement_count == 0
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tokens_to_string(&self.tokens))
    }
}

/// Tokenize and group `sql` using the specified dialect.
pub fn tokenize(sql: &str, dialect: Dialect) -> Result<Vec<SqlToken>, ParseError> {
    let lexemes = lexer::lex(sql, dialect)?;
    Ok(grouping::group(lexer::classify(lexemes)))
}

/// Parse `sql` into a [`Statement`] using the specified dialect.
pub fn parse_statement(sql: &str, dialect: Dialect) -> Result<Statement, ParseError> {
    let tokens = tokenize(sql, dialect)?;
    let statement_count = count_statements(&tokens);
    Ok(Statement {
        tokens,
        statement_count,
    })
}

/// Parse `sql` using the generic dialect.
pub fn parse_sql(sql: &str) -> Result<Statement, ParseError> {
    parse_statement(sql, Dialect::Generic)
}

/// Counts `;`-separated segments holding at least one significant token.
///
/// Only top-level semicolons split; a trailing `;` does not open a new statement.
pub fn count_statements(tokens: &[SqlToken]) -> usize {
    let mut count = 0;
    let mut segment_has_content = false;

    for token in tokens {
        match token {
            SqlToken::Punctuation(text) if text == ";" => {
                if segment_has_content {
                    count += 1;
                }
                segment_has_content = false;
            }
            SqlToken::Whitespace(_) => {}
            _ => segment_has_content = true,
        }
    }

    if segment_has_content {
        count += 1;
    }
    count
}
