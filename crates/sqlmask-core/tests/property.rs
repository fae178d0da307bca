use proptest::prelude::*;
use sqlmask_core::{anonymize, process_query, AnonymizeRequest, Dialect, RewriteStatus};

mod common;
use common::hash_column;

fn column_name() -> impl Strategy<Value = String> {
    "col_[a-z]{1,8}"
}

proptest! {
    #[test]
    fn select_list_columns_hash_deterministically(
        columns in prop::collection::vec(column_name(), 1..6),
        table in "tbl_[a-z]{1,8}",
    ) {
        let sql = format!("SELECT {} FROM {table}", columns.join(", "));

        let (first, map) = process_query(&sql);
        let (second, _) = process_query(&sql);

        prop_assert_eq!(&first, &second);
        let expected: Vec<String> = columns.iter().map(|column| hash_column(column)).collect();
        prop_assert_eq!(first, format!("SELECT {} FROM {table}", expected.join(", ")));
        for column in &columns {
            prop_assert_eq!(&map[column.as_str()], &hash_column(column));
        }
        prop_assert!(!map.contains_key(table.as_str()));
    }

    #[test]
    fn each_column_is_hashed_once(
        column in column_name(),
        repeats in 1usize..5,
    ) {
        let select = vec![column.as_str(); repeats].join(", ");
        let sql = format!("SELECT {select} FROM t WHERE {column} IS NOT NULL");

        let (_, map) = process_query(&sql);

        prop_assert_eq!(map.len(), 1);
    }

    #[test]
    fn multi_statement_input_passes_through(
        left in column_name(),
        right in column_name(),
    ) {
        let sql = format!("SELECT {left} FROM a; SELECT {right} FROM b");

        let (rewritten, map) = process_query(&sql);

        prop_assert_eq!(rewritten, sql);
        prop_assert!(map.is_empty());
    }

    #[test]
    fn whitespace_only_input_is_identity(sql in "[ \t\n]{0,16}") {
        let result = anonymize(&AnonymizeRequest::new(sql.clone()));

        prop_assert_eq!(result.sql, sql);
        prop_assert_eq!(result.status, RewriteStatus::Empty);
    }

    #[test]
    fn never_panics_on_arbitrary_input(sql in "\\PC{0,64}") {
        for dialect in [Dialect::Generic, Dialect::Postgres, Dialect::Mysql] {
            let result = anonymize(&AnonymizeRequest::new(sql.clone()).with_dialect(dialect));
            if result.status.is_passthrough() {
                prop_assert_eq!(&result.sql, &sql);
                prop_assert!(result.column_map.is_empty());
            }
        }
    }
}
