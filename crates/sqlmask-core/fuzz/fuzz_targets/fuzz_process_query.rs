//! Fuzz target for the anonymizer.
//!
//! `anonymize()` must never panic, and a passthrough must echo its input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sqlmask_core::{anonymize, AnonymizeRequest, Dialect};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql: String,
    dialect_idx: u8,
}

impl FuzzInput {
    fn dialect(&self) -> Dialect {
        match self.dialect_idx % 5 {
            0 => Dialect::Generic,
            1 => Dialect::Postgres,
            2 => Dialect::Mysql,
            3 => Dialect::Bigquery,
            _ => Dialect::Snowflake,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let request = AnonymizeRequest::new(input.sql.as_str()).with_dialect(input.dialect());
    let result = anonymize(&request);

    if result.status.is_passthrough() {
        assert_eq!(result.sql, input.sql);
        assert!(result.column_map.is_empty());
    }
});
