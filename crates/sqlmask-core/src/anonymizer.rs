//! Entry points tying tokenization, rewriting and hashing together.

#[cfg(feature = "tracing")]
use tracing::{debug, debug_span};

use crate::functions::FunctionSet;
use crate::parser::parse_statement;
use crate::rewriter::{ColumnRewriter, RewriteContext};
use crate::token::tokens_to_string;
use crate::types::{AnonymizeRequest, AnonymizeResult, ColumnMap, RewriteStatus};

/// Anonymizes the column names of `sql` using the generic dialect.
///
/// Returns the rewritten query and the column-to-hash map. Inputs that are
/// empty, hold several statements, or cannot be tokenized come back unchanged
/// with an empty map.
pub fn process_query(sql: &str) -> (String, ColumnMap) {
    let result = anonymize(&AnonymizeRequest::new(sql));
    (result.sql, result.column_map)
}

/// Main entry point for anonymization.
pub fn anonymize(request: &AnonymizeRequest) -> AnonymizeResult {
    #[cfg(feature = "tracing")]
    let _span = debug_span!("anonymize_request", dialect = ?request.dialect, len = request.sql.len())
        .entered();

    let sql = request.sql.as_str();
    if sql.trim().is_empty() {
        return AnonymizeResult::passthrough(sql, RewriteStatus::Empty);
    }

    let statement = match parse_statement(sql, request.dialect) {
        Ok(statement) => statement,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            debug!(error = %_err, "tokenization failed; returning input unchanged");
            return AnonymizeResult::passthrough(sql, RewriteStatus::Unparseable);
        }
    };

    match statement.statement_count() {
        0 => return AnonymizeResult::passthrough(sql, RewriteStatus::Empty),
        1 => {}
        _count => {
            #[cfg(feature = "tracing")]
            debug!(statements = _count, "multiple statements; returning input unchanged");
            return AnonymizeResult::passthrough(sql, RewriteStatus::MultipleStatements);
        }
    }

    let functions = match &request.options {
        Some(options) => FunctionSet::with_additional(&options.additional_functions),
        None => FunctionSet::new(),
    };
    let mut rewriter = ColumnRewriter::new(&functions);
    let tokens = rewriter.rewrite(statement.tokens(), RewriteContext::default());

    AnonymizeResult {
        sql: tokens_to_string(&tokens),
        column_map: rewriter.into_column_map(),
        status: RewriteStatus::Rewritten,
    }
}
