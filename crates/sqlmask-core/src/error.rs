//! Error types for SQL tokenization.
//!
//! # Error Handling Strategy
//!
//! [`ParseError`] is returned by the lower-level parsing entry points
//! ([`crate::parse_statement`], [`crate::parser::tokenize`]) when the input
//! cannot be turned into a token tree.
//!
//! The anonymization entry points ([`crate::process_query`],
//! [`crate::anonymize`]) never surface it: any parse failure collapses to the
//! identity transform, and the reason is reported through
//! [`crate::RewriteStatus::Unparseable`].

use crate::types::Dialect;
use sqlparser::tokenizer::TokenizerError;
use std::fmt;

/// Error encountered while tokenizing SQL.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Location of the offending character, if available.
    pub position: Option<Position>,
    /// The SQL dialect being tokenized when the error occurred.
    pub dialect: Option<Dialect>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Category of parse error for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// The tokenizer rejected the input (unterminated string, stray character).
    #[default]
    LexerError,
    /// A token location reported by the tokenizer does not map back into the source.
    SpanOutOfRange,
}

impl ParseError {
    /// Creates a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            dialect: None,
            kind: ParseErrorKind::LexerError,
        }
    }

    /// Creates a parse error with position information.
    pub fn with_position(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(Position { line, column }),
            dialect: None,
            kind: ParseErrorKind::LexerError,
        }
    }

    /// Adds dialect context to the error.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Sets the error kind.
    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error")?;

        if let Some(dialect) = self.dialect {
            write!(f, " ({dialect:?})")?;
        }

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizerError> for ParseError {
    fn from(err: TokenizerError) -> Self {
        // sqlparser uses 0 for "unknown" locations.
        let position = (err.location.line > 0).then_some(Position {
            line: err.location.line as usize,
            column: err.location.column as usize,
        });

        Self {
            message: err.message,
            position,
            dialect: None,
            kind: ParseErrorKind::LexerError,
        }
    }
}
