//! CLI argument parsing using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// sqlmask - replace SQL column names with stable hashes
#[derive(Parser, Debug)]
#[command(name = "sqlmask")]
#[command(about = "Anonymize the column names of a SQL query", long_about = None)]
#[command(version)]
pub struct Args {
    /// SQL query to anonymize (reads --file or stdin if omitted)
    #[arg(value_name = "SQL", conflicts_with = "file")]
    pub sql: Option<String>,

    /// Read the SQL query from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// SQL dialect
    #[arg(short, long, default_value = "generic", value_enum)]
    pub dialect: DialectArg,

    /// Extra function name to leave unhashed (repeatable)
    #[arg(long = "function", value_name = "NAME")]
    pub functions: Vec<String>,

    /// Pretty-print the column map JSON
    #[arg(long)]
    pub pretty: bool,
}

/// SQL dialect options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectArg {
    Generic,
    Ansi,
    Bigquery,
    Clickhouse,
    Databricks,
    Duckdb,
    Hive,
    Mssql,
    Mysql,
    Postgres,
    Redshift,
    Snowflake,
    Sqlite,
}

impl From<DialectArg> for sqlmask_core::Dialect {
    fn from(d: DialectArg) -> Self {
        match d {
            DialectArg::Generic => sqlmask_core::Dialect::Generic,
            DialectArg::Ansi => sqlmask_core::Dialect::Ansi,
            DialectArg::Bigquery => sqlmask_core::Dialect::Bigquery,
            DialectArg::Clickhouse => sqlmask_core::Dialect::Clickhouse,
            DialectArg::Databricks => sqlmask_core::Dialect::Databricks,
            DialectArg::Duckdb => sqlmask_core::Dialect::Duckdb,
            DialectArg::Hive => sqlmask_core::Dialect::Hive,
            DialectArg::Mssql => sqlmask_core::Dialect::Mssql,
            DialectArg::Mysql => sqlmask_core::Dialect::Mysql,
            DialectArg::Postgres => sqlmask_core::Dialect::Postgres,
            DialectArg::Redshift => sqlmask_core::Dialect::Redshift,
            DialectArg::Snowflake => sqlmask_core::Dialect::Snowflake,
            DialectArg::Sqlite => sqlmask_core::Dialect::Sqlite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_conversion() {
        let dialect: sqlmask_core::Dialect = DialectArg::Postgres.into();
        assert_eq!(dialect, sqlmask_core::Dialect::Postgres);
    }

    #[test]
    fn test_parse_minimal_args() {
        let args = Args::parse_from(["sqlmask", "SELECT col1 FROM t"]);
        assert_eq!(args.sql.as_deref(), Some("SELECT col1 FROM t"));
        assert_eq!(args.dialect, DialectArg::Generic);
        assert!(args.functions.is_empty());
        assert!(args.file.is_none());
        assert!(!args.pretty);
    }

    #[test]
    fn test_parse_full_args() {
        let args = Args::parse_from([
            "sqlmask",
            "-d",
            "postgres",
            "--function",
            "mask",
            "--function",
            "jsonb_agg",
            "--pretty",
            "-f",
            "query.sql",
        ]);
        assert_eq!(args.dialect, DialectArg::Postgres);
        assert_eq!(args.functions, vec!["mask", "jsonb_agg"]);
        assert_eq!(args.file, Some(PathBuf::from("query.sql")));
        assert!(args.sql.is_none());
        assert!(args.pretty);
    }

    #[test]
    fn test_sql_and_file_conflict() {
        let result = Args::try_parse_from(["sqlmask", "-f", "query.sql", "SELECT 1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_args_is_valid() {
        let args = Args::parse_from(["sqlmask"]);
        assert!(args.sql.is_none());
        assert!(args.file.is_none());
    }
}
