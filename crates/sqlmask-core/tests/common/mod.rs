#![allow(dead_code)]

use md5::{Digest, Md5};
use sqlmask_core::{anonymize, AnonymizeRequest, AnonymizeResult, Dialect};

/// MD5 hex digest of a column name, computed independently of the crate.
pub fn hash_column(name: &str) -> String {
    format!("{:x}", Md5::digest(name.as_bytes()))
}

pub fn run(sql: &str, dialect: Dialect) -> AnonymizeResult {
    anonymize(&AnonymizeRequest::new(sql).with_dialect(dialect))
}
