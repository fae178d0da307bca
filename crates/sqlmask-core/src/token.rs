//! Typed token tree produced by [`crate::parser`].
//!
//! Leaves keep their source text verbatim, so printing an untouched tree gives
//! back the original SQL byte for byte.

use std::fmt;

/// A node in the parsed token tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlToken {
    /// A reserved word such as `SELECT`, `FROM` or `GROUP BY`.
    Keyword(String),
    /// A bare name that is not itself a reference: identifier parts, alias
    /// names after a standalone `AS`, type names after `::`, rewritten hashes.
    Name(String),
    /// String, number and boolean-like literals.
    Literal(String),
    /// Operators, commas, dots, parentheses and other symbols.
    Punctuation(String),
    /// Bind parameters: `?`, `$1`, `:name`, `@name`.
    Placeholder(String),
    /// Whitespace and comments.
    Whitespace(String),
    /// A name reference with optional qualifier and alias.
    Identifier(Identifier),
    /// A parenthesized expression, subquery or function call.
    Group(Group),
}

impl SqlToken {
    /// Returns true if this is a keyword matching `keyword` (case-insensitive).
    ///
    /// Multi-word keywords compare with their inner whitespace collapsed, so
    /// `GROUP\n  BY` matches `"GROUP BY"`.
    pub fn is_keyword(&self, keyword: &str) -> bool {
        match self {
            SqlToken::Keyword(text) => {
                let mut words = text.split_whitespace();
                let mut expected = keyword.split_whitespace();
                loop {
                    match (words.next(), expected.next()) {
                        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => continue,
                        (None, None) => return true,
                        _ => return false,
                    }
                }
            }
            _ => false,
        }
    }

    /// Returns true for whitespace and comments.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, SqlToken::Whitespace(_))
    }

    /// Returns true if the token carries children.
    pub fn is_group(&self) -> bool {
        matches!(self, SqlToken::Identifier(_) | SqlToken::Group(_))
    }

    /// Child tokens for identifiers and groups, empty for leaves.
    pub fn children(&self) -> &[SqlToken] {
        match self {
            SqlToken::Identifier(identifier) => &identifier.tokens,
            SqlToken::Group(group) => &group.tokens,
            _ => &[],
        }
    }
}

impl fmt::Display for SqlToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlToken::Keyword(text)
            | SqlToken::Name(text)
            | SqlToken::Literal(text)
            | SqlToken::Punctuation(text)
            | SqlToken::Placeholder(text)
            | SqlToken::Whitespace(text) => f.write_str(text),
            SqlToken::Identifier(identifier) => write_tokens(f, &identifier.tokens),
            SqlToken::Group(group) => write_tokens(f, &group.tokens),
        }
    }
}

fn write_tokens(f: &mut fmt::Formatter<'_>, tokens: &[SqlToken]) -> fmt::Result {
    for token in tokens {
        write!(f, "{token}")?;
    }
    Ok(())
}

/// Renders a token sequence back to SQL text.
pub fn tokens_to_string(tokens: &[SqlToken]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// What an identifier's body refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// A plain (possibly qualified) name: `col`, `t.col`, `"Col"`.
    Column,
    /// A qualified star: `t.*`.
    Wildcard,
    /// A function call, possibly qualified: `COUNT(x)`, `pg_catalog.lower(x)`.
    Call,
    /// A parenthesized expression or subquery: `(a + b)`, `(SELECT ...)`.
    Expression,
}

/// A name reference: a column, table, alias or called function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub(crate) tokens: Vec<SqlToken>,
    pub(crate) kind: IdentifierKind,
    pub(crate) real_name: Option<String>,
    pub(crate) qualifier: Option<String>,
    pub(crate) alias: Option<String>,
    pub(crate) alias_keyword: Option<String>,
}

impl Identifier {
    /// The bare name, unquoted: `col` for `t."col" AS c`, `COUNT` for
    /// `COUNT(x) AS n`. `None` for parenthesized bodies.
    pub fn real_name(&self) -> Option<&str> {
        self.real_name.as_deref()
    }

    /// The dotted prefix as written: `t` for `t.col`, `s.t` for `s.t.col`.
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// The alias name as written.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The `AS` keyword as written, if the alias was introduced by one.
    pub fn alias_keyword(&self) -> Option<&str> {
        self.alias_keyword.as_deref()
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    /// True when the body holds nested tokens: a call or a parenthesized expression.
    pub fn is_group(&self) -> bool {
        matches!(self.kind, IdentifierKind::Call | IdentifierKind::Expression)
    }

    pub fn tokens(&self) -> &[SqlToken] {
        &self.tokens
    }
}

/// The shape of a [`Group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `( ... )` holding an expression or list.
    Parenthesis,
    /// `( ... )` whose first word is `SELECT` or `WITH`.
    Subquery,
    /// A function name directly followed by its argument list.
    Function,
}

/// A token with nested children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub(crate) kind: GroupKind,
    pub(crate) tokens: Vec<SqlToken>,
}

impl Group {
    pub fn new(kind: GroupKind, tokens: Vec<SqlToken>) -> Self {
        Self { kind, tokens }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn tokens(&self) -> &[SqlToken] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_keyword_case_insensitive() {
        let token = SqlToken::Keyword("from".to_string());
        assert!(token.is_keyword("FROM"));
        assert!(!token.is_keyword("WHERE"));
    }

    #[test]
    fn test_is_keyword_collapses_inner_whitespace() {
        let token = SqlToken::Keyword("group\n   by".to_string());
        assert!(token.is_keyword("GROUP BY"));
        assert!(!token.is_keyword("GROUP"));
        assert!(!token.is_keyword("ORDER BY"));
    }

    #[test]
    fn test_non_keyword_never_matches() {
        let token = SqlToken::Name("FROM".to_string());
        assert!(!token.is_keyword("FROM"));
    }

    #[test]
    fn test_display_concatenates_children() {
        let group = SqlToken::Group(Group::new(
            GroupKind::Parenthesis,
            vec![
                SqlToken::Punctuation("(".to_string()),
                SqlToken::Literal("1".to_string()),
                SqlToken::Punctuation(",".to_string()),
                SqlToken::Whitespace(" ".to_string()),
                SqlToken::Literal("2".to_string()),
                SqlToken::Punctuation(")".to_string()),
            ],
        ));
        assert_eq!(group.to_string(), "(1, 2)");
        assert_eq!(tokens_to_string(&[group.clone(), group]), "(1, 2)(1, 2)");
    }
}
