//! The three-line report printed for each query.

use sqlmask_core::AnonymizeResult;

use super::json::format_column_map;

/// Format the input, the rewritten query and the column map:
///
/// ```text
/// Input SQL: <original>
/// Modified SQL: <rewritten>
/// MAP: <column map JSON>
/// ```
pub fn format_report(input: &str, result: &AnonymizeResult, pretty: bool) -> String {
    format!(
        "Input SQL: {input}\nModified SQL: {}\nMAP: {}\n",
        result.sql,
        format_column_map(&result.column_map, pretty)
    )
}
