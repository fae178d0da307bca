//! Request and response types for the anonymization API.
//!
//! The API accepts a single SQL query and returns the rewritten query together
//! with the mapping from each original column name to its hash.

mod request;
mod response;

pub use request::{AnonymizeOptions, AnonymizeRequest, Dialect};
pub use response::{AnonymizeResult, ColumnMap, RewriteStatus};
