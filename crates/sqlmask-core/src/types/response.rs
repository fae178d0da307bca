//! Response types for the anonymization API.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mapping from original column name to its hash, in first-seen order.
pub type ColumnMap = IndexMap<String, String>;

/// How the query was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub enum RewriteStatus {
    /// The statement was tokenized and walked (the map may still be empty)
    #[default]
    Rewritten,
    /// The input was empty or whitespace only
    Empty,
    /// The input held more than one statement and was passed through
    MultipleStatements,
    /// The input could not be tokenized and was passed through
    Unparseable,
}

impl RewriteStatus {
    /// Returns true when the output is the input echoed back verbatim.
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, Self::Rewritten)
    }
}

/// The result of anonymizing one SQL query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeResult {
    /// The rewritten SQL
    pub sql: String,

    /// Original column name to hash
    pub column_map: ColumnMap,

    /// How the query was handled
    pub status: RewriteStatus,
}

impl AnonymizeResult {
    /// A result that echoes `sql` back with an empty map.
    pub fn passthrough(sql: impl Into<String>, status: RewriteStatus) -> Self {
        Self {
            sql: sql.into(),
            column_map: ColumnMap::new(),
            status,
        }
    }
}
