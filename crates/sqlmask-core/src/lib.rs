//! Column-name anonymization for SQL queries.
//!
//! [`process_query`] rewrites every column reference in a single SQL
//! statement to a deterministic hash (MD5 hex by default) and returns the
//! mapping from original name to hash. Table names, aliases, function names,
//! literals, placeholders and the contents of subqueries are left as written.
//!
//! ```
//! let (sql, map) = sqlmask_core::process_query("SELECT col1 FROM t");
//! assert_eq!(sql, format!("SELECT {} FROM t", map["col1"]));
//! ```

pub mod anonymizer;
pub mod error;
pub mod functions;
pub mod hashing;
pub mod parser;
pub mod rewriter;
pub mod token;
pub mod types;

// Re-export main types and functions
pub use anonymizer::{anonymize, process_query};
pub use error::{ParseError, ParseErrorKind, Position};
pub use functions::{is_default_function, FunctionSet};
pub use hashing::{ColumnHashMap, ColumnHasher, Md5Hasher};
pub use parser::{parse_sql, parse_statement, tokenize, Statement};
pub use rewriter::{ColumnRewriter, RewriteContext};
pub use token::{tokens_to_string, Group, GroupKind, Identifier, IdentifierKind, SqlToken};

// Re-export types explicitly
pub use types::{
    AnonymizeOptions, AnonymizeRequest, AnonymizeResult, ColumnMap, Dialect, RewriteStatus,
};
