//! Column classification and rewriting over the token tree.
//!
//! The rewriter walks one token sequence at a time, deciding for every
//! [`Identifier`] whether it names a column. Column references are replaced by
//! their hash; table names, aliases, function names and everything inside a
//! subquery are left as written.

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::functions::FunctionSet;
use crate::hashing::{ColumnHashMap, ColumnHasher, Md5Hasher};
use crate::token::{Group, GroupKind, Identifier, IdentifierKind, SqlToken};
use crate::types::ColumnMap;

/// Keywords that end the table list started by `FROM`.
const FROM_TERMINATORS: &[&str] = &["WHERE", "GROUP BY", "ORDER BY"];

/// Keywords directly followed by a table name.
const TABLE_INTRODUCERS: &[&str] = &["INTO", "UPDATE", "TABLE"];

/// Traversal state handed down to each nested sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteContext {
    /// Inside a `FROM` clause: identifiers name tables and are kept.
    pub after_from: bool,
    /// Inside an aliased call or expression: identifiers are kept and never hashed.
    pub suppress: bool,
}

/// Rewrites column references, recording each hashed name.
pub struct ColumnRewriter<'a, H = Md5Hasher> {
    functions: &'a FunctionSet,
    columns: ColumnHashMap<H>,
}

impl<'a> ColumnRewriter<'a, Md5Hasher> {
    pub fn new(functions: &'a FunctionSet) -> Self {
        Self::with_hasher(functions, Md5Hasher)
    }
}

impl<'a, H: ColumnHasher> ColumnRewriter<'a, H> {
    pub fn with_hasher(functions: &'a FunctionSet, hasher: H) -> Self {
        Self {
            functions,
            columns: ColumnHashMap::new(hasher),
        }
    }

    /// Consumes the rewriter, returning the column map in first-seen order.
    pub fn into_column_map(self) -> ColumnMap {
        self.columns.into_map()
    }

    /// Rewrites one token sequence.
    ///
    /// `ctx.after_from` is updated as `FROM` and its terminators are seen, and
    /// the current value is what nested groups start from.
    pub fn rewrite(&mut self, tokens: &[SqlToken], ctx: RewriteContext) -> Vec<SqlToken> {
        let mut ctx = ctx;
        let mut out = Vec::with_capacity(tokens.len());

        for (index, token) in tokens.iter().enumerate() {
            if opens_from_clause(tokens, index) {
                ctx.after_from = true;
            }

            match token {
                SqlToken::Identifier(identifier) => {
                    self.rewrite_identifier(identifier, tokens, index, ctx, &mut out);
                }
                SqlToken::Group(group) if group.kind == GroupKind::Subquery => {
                    out.push(token.clone());
                }
                SqlToken::Group(group)
                    if group.kind == GroupKind::Function && names_relation(tokens, index) =>
                {
                    out.push(SqlToken::Group(self.rewrite_column_list(group, ctx)));
                }
                SqlToken::Group(group) => {
                    let children = self.rewrite(
                        &group.tokens,
                        RewriteContext {
                            suppress: false,
                            ..ctx
                        },
                    );
                    out.push(SqlToken::Group(Group::new(group.kind, children)));
                }
                _ => out.push(token.clone()),
            }

            if ctx.after_from
                && FROM_TERMINATORS
                    .iter()
                    .any(|keyword| token.is_keyword(keyword))
            {
                ctx.after_from = false;
            }
        }

        out
    }

    fn rewrite_identifier(
        &mut self,
        identifier: &Identifier,
        siblings: &[SqlToken],
        index: usize,
        ctx: RewriteContext,
        out: &mut Vec<SqlToken>,
    ) {
        let keep = ctx.suppress || ctx.after_from || names_relation(siblings, index);
        if keep {
            out.push(SqlToken::Identifier(identifier.clone()));
            return;
        }

        if self.is_callable(identifier) {
            if identifier.is_group() && identifier.has_alias() {
                let inner = RewriteContext {
                    suppress: true,
                    ..ctx
                };
                out.extend(self.rewrite(identifier.tokens(), inner));
            } else if identifier.is_group() {
                out.extend(self.rewrite(identifier.tokens(), ctx));
            } else {
                out.push(SqlToken::Identifier(identifier.clone()));
            }
            return;
        }

        let Some(name) = identifier.real_name() else {
            out.push(SqlToken::Identifier(identifier.clone()));
            return;
        };
        if identifier.kind() == IdentifierKind::Wildcard {
            out.push(SqlToken::Identifier(identifier.clone()));
            return;
        }

        let hash = self.columns.lookup_or_create(name);
        #[cfg(feature = "tracing")]
        trace!(column = name, hash = %hash, "hashed column reference");
        out.push(SqlToken::Name(reconstruct(identifier, &hash)));
    }

    /// Keeps the relation name of `users(a, b)` and rewrites only its column list.
    fn rewrite_column_list(&mut self, relation: &Group, ctx: RewriteContext) -> Group {
        let Some((name, columns)) = relation.tokens.split_first() else {
            return relation.clone();
        };
        let mut children = vec![name.clone()];
        children.extend(self.rewrite(
            columns,
            RewriteContext {
                suppress: false,
                ..ctx
            },
        ));
        Group::new(relation.kind, children)
    }

    /// A known function name, or a body that is a call or parenthesized expression.
    fn is_callable(&self, identifier: &Identifier) -> bool {
        identifier.is_group()
            || identifier
                .real_name()
                .is_some_and(|name| self.functions.is_function(name))
    }
}

/// Renders the hashed reference as `[qualifier.]hash[ AS alias]`.
fn reconstruct(identifier: &Identifier, hash: &str) -> String {
    let body = match identifier.qualifier() {
        Some(qualifier) => format!("{qualifier}.{hash}"),
        None => hash.to_string(),
    };
    match identifier.alias() {
        Some(alias) => {
            let keyword = identifier.alias_keyword().unwrap_or("AS");
            format!("{body} {keyword} {alias}")
        }
        None => body,
    }
}

/// `FROM` starts a table list unless it belongs to `IS [NOT] DISTINCT FROM`.
fn opens_from_clause(siblings: &[SqlToken], index: usize) -> bool {
    siblings[index].is_keyword("FROM")
        && !previous_significant(siblings, index).is_some_and(|token| token.is_keyword("DISTINCT"))
}

fn previous_significant(siblings: &[SqlToken], index: usize) -> Option<&SqlToken> {
    siblings[..index]
        .iter()
        .rev()
        .find(|token| !token.is_whitespace())
}

/// True for a table written after `INTO`/`UPDATE`/`TABLE`, or a CTE name
/// (`name AS (SELECT ...)`).
fn names_relation(siblings: &[SqlToken], index: usize) -> bool {
    let introduced = previous_significant(siblings, index).is_some_and(|token| {
        TABLE_INTRODUCERS
            .iter()
            .any(|keyword| token.is_keyword(keyword))
    });
    if introduced {
        return true;
    }

    let mut following = siblings[index + 1..]
        .iter()
        .filter(|token| !token.is_whitespace());
    match (following.next(), following.next()) {
        (Some(keyword), Some(SqlToken::Group(group))) => {
            keyword.is_keyword("AS") && group.kind == GroupKind::Subquery
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use crate::token::tokens_to_string;
    use crate::types::Dialect;

    /// Replaces every column with `h(name)` so expectations stay readable.
    struct Tag;

    impl ColumnHasher for Tag {
        fn hash(&self, name: &str) -> String {
            format!("h({name})")
        }
    }

    fn rewrite(sql: &str) -> (String, ColumnMap) {
        let functions = FunctionSet::new();
        let mut rewriter = ColumnRewriter::with_hasher(&functions, Tag);
        let tokens = tokenize(sql, Dialect::Generic).unwrap();
        let rewritten = rewriter.rewrite(&tokens, RewriteContext::default());
        (tokens_to_string(&rewritten), rewriter.into_column_map())
    }

    fn sql(input: &str) -> String {
        rewrite(input).0
    }

    #[test]
    fn test_select_list_columns_are_hashed() {
        assert_eq!(
            sql("SELECT col1, col2 FROM table_name"),
            "SELECT h(col1), h(col2) FROM table_name"
        );
    }

    #[test]
    fn test_qualified_column_keeps_qualifier() {
        assert_eq!(
            sql("SELECT s.t.col1 FROM s.t"),
            "SELECT s.t.h(col1) FROM s.t"
        );
    }

    #[test]
    fn test_alias_keyword_is_reproduced_as_written() {
        assert_eq!(
            sql("SELECT t.col1 as a, col2 AS b FROM t"),
            "SELECT t.h(col1) as a, h(col2) AS b FROM t"
        );
    }

    #[test]
    fn test_implicit_alias_gains_as() {
        assert_eq!(sql("SELECT col1 c FROM t"), "SELECT h(col1) AS c FROM t");
    }

    #[test]
    fn test_aliased_call_only_hashes_arguments() {
        assert_eq!(
            sql("SELECT COUNT(t.col2) as n FROM t"),
            "SELECT COUNT(t.h(col2)) as n FROM t"
        );
    }

    #[test]
    fn test_aliased_expression_keeps_alias() {
        assert_eq!(
            sql("SELECT (a + b) AS total FROM t"),
            "SELECT (h(a) + h(b)) AS total FROM t"
        );
    }

    #[test]
    fn test_qualified_call_hashes_arguments() {
        assert_eq!(
            sql("SELECT pg_catalog.lower(name) FROM t"),
            "SELECT pg_catalog.lower(h(name)) FROM t"
        );
    }

    #[test]
    fn test_niladic_function_is_kept() {
        assert_eq!(
            sql("SELECT CURRENT_TIMESTAMP, col1 FROM t"),
            "SELECT CURRENT_TIMESTAMP, h(col1) FROM t"
        );
    }

    #[test]
    fn test_wildcards_are_kept() {
        assert_eq!(sql("SELECT t.*, * FROM t"), "SELECT t.*, * FROM t");
    }

    #[test]
    fn test_where_resets_from_clause() {
        assert_eq!(
            sql("SELECT a FROM t x WHERE x.b = 1 ORDER BY c"),
            "SELECT h(a) FROM t x WHERE x.h(b) = 1 ORDER BY h(c)"
        );
    }

    #[test]
    fn test_join_condition_stays_in_from_clause() {
        assert_eq!(
            sql("SELECT a FROM t JOIN u ON t.id = u.id"),
            "SELECT h(a) FROM t JOIN u ON t.id = u.id"
        );
    }

    #[test]
    fn test_subqueries_are_isolated() {
        let (rewritten, map) = rewrite("SELECT a FROM t WHERE b IN (SELECT c FROM u)");
        assert_eq!(rewritten, "SELECT h(a) FROM t WHERE h(b) IN (SELECT c FROM u)");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_scalar_subquery_with_alias_is_kept() {
        assert_eq!(
            sql("SELECT (SELECT MAX(x) FROM u) AS m FROM t"),
            "SELECT (SELECT MAX(x) FROM u) AS m FROM t"
        );
    }

    #[test]
    fn test_insert_and_update_targets_are_kept() {
        assert_eq!(
            sql("INSERT INTO t (a, b) VALUES (1, 2)"),
            "INSERT INTO t (h(a), h(b)) VALUES (1, 2)"
        );
        assert_eq!(
            sql("UPDATE t SET a = 1 WHERE b = 2"),
            "UPDATE t SET h(a) = 1 WHERE h(b) = 2"
        );
    }

    #[test]
    fn test_relation_name_before_column_list_is_kept() {
        let (rewritten, map) = rewrite("INSERT INTO users(name, email) VALUES (1, 2)");
        assert_eq!(rewritten, "INSERT INTO users(h(name), h(email)) VALUES (1, 2)");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["name", "email"]);

        let (rewritten, map) =
            rewrite("WITH recent(x) AS (SELECT a FROM t) SELECT b FROM recent");
        assert_eq!(
            rewritten,
            "WITH recent(h(x)) AS (SELECT a FROM t) SELECT h(b) FROM recent"
        );
        assert!(!map.contains_key("recent"));
    }

    #[test]
    fn test_parameterized_types_are_kept() {
        let (rewritten, map) = rewrite("SELECT CAST(price AS DECIMAL(10,2)) FROM t");
        assert_eq!(rewritten, "SELECT CAST(h(price) AS DECIMAL(10,2)) FROM t");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["price"]);

        let (rewritten, map) = rewrite("SELECT price::numeric(10,2), a::varchar(10) FROM t");
        assert_eq!(
            rewritten,
            "SELECT h(price)::numeric(10,2), h(a)::varchar(10) FROM t"
        );
        assert_eq!(map.keys().collect::<Vec<_>>(), ["price", "a"]);
    }

    #[test]
    fn test_distinct_from_is_a_comparison() {
        assert_eq!(
            sql("SELECT a FROM t WHERE a IS NOT DISTINCT FROM b"),
            "SELECT h(a) FROM t WHERE h(a) IS NOT DISTINCT FROM h(b)"
        );
    }

    #[test]
    fn test_locking_clause_is_kept() {
        let (rewritten, map) = rewrite("SELECT a FROM t WHERE b = 1 FOR UPDATE");
        assert_eq!(rewritten, "SELECT h(a) FROM t WHERE h(b) = 1 FOR UPDATE");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn test_cte_name_is_kept() {
        assert_eq!(
            sql("WITH recent AS (SELECT a FROM t) SELECT b FROM recent"),
            "WITH recent AS (SELECT a FROM t) SELECT h(b) FROM recent"
        );
    }

    #[test]
    fn test_cast_type_and_case_label_are_kept() {
        assert_eq!(
            sql("SELECT a::text, CASE WHEN b THEN 1 END AS label FROM t"),
            "SELECT h(a)::text, CASE WHEN h(b) THEN 1 END AS label FROM t"
        );
    }

    #[test]
    fn test_quoted_column_maps_unquoted_name() {
        let (rewritten, map) = rewrite("SELECT \"My Col\" FROM t");
        assert_eq!(rewritten, "SELECT h(My Col) FROM t");
        assert!(map.contains_key("My Col"));
    }

    #[test]
    fn test_repeated_column_hashes_once() {
        let (rewritten, map) = rewrite("SELECT col1 FROM t WHERE col1 > 0 ORDER BY col1");
        assert_eq!(
            rewritten,
            "SELECT h(col1) FROM t WHERE h(col1) > 0 ORDER BY h(col1)"
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_additional_functions_are_exempt() {
        let functions = FunctionSet::with_additional(["mask"]);
        let mut rewriter = ColumnRewriter::with_hasher(&functions, Tag);
        let tokens = tokenize("SELECT mask(a), other(b) FROM t", Dialect::Generic).unwrap();
        let rewritten = rewriter.rewrite(&tokens, RewriteContext::default());
        assert_eq!(
            tokens_to_string(&rewritten),
            "SELECT mask(h(a)), h(other)(h(b)) FROM t"
        );
    }
}
