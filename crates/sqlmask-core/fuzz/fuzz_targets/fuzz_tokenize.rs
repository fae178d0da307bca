//! Fuzz target for the tokenizer.
//!
//! Whatever `tokenize()` accepts must print back to the exact input.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sqlmask_core::{tokenize, tokens_to_string, Dialect};

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
    if let Ok(tokens) = tokenize(&input.sql, input.dialect()) {
        assert_eq!(tokens_to_string(&tokens), input.sql);
    }
});
