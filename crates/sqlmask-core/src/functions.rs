//! Function name classification.
//!
//! A name found in call position, or on its own where the grammar allows a
//! niladic function (`CURRENT_TIMESTAMP`, `SYSDATE`), is never treated as a
//! column when it belongs to the function set.

use std::collections::HashSet;
use std::sync::LazyLock;

const AGGREGATE: &[&str] = &[
    "array_agg",
    "avg",
    "count",
    "group_concat",
    "listagg",
    "max",
    "min",
    "stddev",
    "string_agg",
    "sum",
    "variance",
];

const STRING: &[&str] = &[
    "char_length",
    "concat",
    "concat_ws",
    "initcap",
    "left",
    "length",
    "lower",
    "lpad",
    "ltrim",
    "position",
    "replace",
    "right",
    "rpad",
    "rtrim",
    "substr",
    "substring",
    "trim",
    "upper",
];

const DATE_TIME: &[&str] = &[
    "current_date",
    "current_time",
    "current_timestamp",
    "date",
    "date_add",
    "date_format",
    "date_part",
    "date_sub",
    "date_trunc",
    "datetime",
    "day",
    "extract",
    "hour",
    "minute",
    "month",
    "now",
    "second",
    "str_to_date",
    "sysdate",
    "time",
    "timestamp",
    "to_char",
    "to_date",
    "to_number",
    "to_timestamp",
    "year",
];

const MATH: &[&str] = &[
    "abs", "ceil", "ceiling", "cos", "exp", "floor", "ln", "log", "mod", "power", "random",
    "round", "sign", "sin", "sqrt", "tan",
];

const CONDITIONAL: &[&str] = &[
    "case", "cast", "coalesce", "convert", "greatest", "if", "ifnull", "isnull", "least",
    "nullif", "nvl",
];

const WINDOW: &[&str] = &[
    "cume_dist",
    "dense_rank",
    "first_value",
    "lag",
    "last_value",
    "lead",
    "nth_value",
    "ntile",
    "percent_rank",
    "rank",
    "row_number",
];

/// Built-in function names, lowercase.
pub static DEFAULT_FUNCTIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [AGGREGATE, STRING, DATE_TIME, MATH, CONDITIONAL, WINDOW]
        .into_iter()
        .flatten()
        .copied()
        .collect()
});

/// Checks if `name` is a built-in function name.
///
/// The check is case-insensitive. Uses ASCII lowercase since SQL function
/// names are ASCII.
pub fn is_default_function(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    DEFAULT_FUNCTIONS.contains(lower.as_str())
}

/// The function names exempt from hashing for one request: the built-in set
/// plus any caller-supplied names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSet {
    additional: HashSet<String>,
}

impl FunctionSet {
    /// The built-in set only.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in set extended with `names` (user-defined functions).
    pub fn with_additional<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let additional = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        Self { additional }
    }

    /// Case-insensitive membership test.
    pub fn is_function(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        DEFAULT_FUNCTIONS.contains(lower.as_str()) || self.additional.contains(&lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_functions_case_insensitive() {
        assert!(is_default_function("COUNT"));
        assert!(is_default_function("count"));
        assert!(is_default_function("Date_Trunc"));
        assert!(!is_default_function("col1"));
    }

    #[test]
    fn test_niladic_functions_are_known() {
        let functions = FunctionSet::new();
        assert!(functions.is_function("CURRENT_TIMESTAMP"));
        assert!(functions.is_function("sysdate"));
    }

    #[test]
    fn test_additional_functions_extend_defaults() {
        let functions = FunctionSet::with_additional(["my_udf", " Mask_Email "]);
        assert!(functions.is_function("MY_UDF"));
        assert!(functions.is_function("mask_email"));
        assert!(functions.is_function("avg"));
        assert!(!functions.is_function("other"));
    }

    #[test]
    fn test_blank_additional_names_are_ignored() {
        let functions = FunctionSet::with_additional(["", "  "]);
        assert!(!functions.is_function(""));
    }
}
