//! Request types for the anonymization API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A request to anonymize the column names of one SQL query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeRequest {
    /// The SQL query to rewrite (expected to hold zero or one statement)
    pub sql: String,

    /// SQL dialect used to tokenize the query
    #[serde(default)]
    pub dialect: Dialect,

    /// Optional rewrite options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnonymizeOptions>,
}

impl AnonymizeRequest {
    /// Creates a request for `sql` with the generic dialect and default options.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            dialect: Dialect::Generic,
            options: None,
        }
    }

    /// Sets the dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the rewrite options.
    pub fn with_options(mut self, options: AnonymizeOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Options controlling how identifiers are classified.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeOptions {
    /// Extra function names treated like the built-in ones (case-insensitive).
    ///
    /// Identifiers matching one of these are never hashed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_functions: Vec<String>,
}

/// SQL dialect for tokenization.
///
/// Dialects differ in quoting rules and in which characters start placeholders
/// or identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
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

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, DuckDbDialect,
            GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
            RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Clickhouse => Box::new(ClickHouseDialect {}),
            Self::Databricks => Box::new(DatabricksDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Hive => Box::new(HiveDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Redshift => Box::new(RedshiftSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}
