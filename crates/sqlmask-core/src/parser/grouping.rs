//! Builds the token tree from the flat token stream.
//!
//! Grouping runs bottom-up, one nesting level at a time:
//! 1. parentheses become [`GroupKind::Parenthesis`] or [`GroupKind::Subquery`] groups,
//! 2. a name directly followed by a parenthesis becomes a [`GroupKind::Function`],
//! 3. dotted name chains, and calls or parenthesized expressions that carry an
//!    alias, are wrapped in [`Identifier`]s.

use std::collections::VecDeque;

use crate::parser::naming::unquote_identifier;
use crate::token::{Group, GroupKind, Identifier, IdentifierKind, SqlToken};

/// Parentheses nested deeper than this stay flat punctuation, which bounds
/// recursion here and in the rewriter.
const MAX_NESTING_DEPTH: usize = 200;

/// Groups a flat token stream into a tree.
///
/// Never fails: an unmatched `)` stays punctuation and an unclosed `(` extends
/// its group to the end of the input.
pub(crate) fn group(flat: Vec<SqlToken>) -> Vec<SqlToken> {
    let mut iter = flat.into_iter();
    group_level(nest_parentheses(&mut iter, 0))
}

fn is_punctuation(token: &SqlToken, symbol: &str) -> bool {
    matches!(token, SqlToken::Punctuation(text) if text == symbol)
}

/// Collects tokens up to the `)` closing the current level.
///
/// Below the top level (`depth > 0`) the returned tokens end with that `)`.
fn nest_parentheses(iter: &mut impl Iterator<Item = SqlToken>, depth: usize) -> Vec<SqlToken> {
    let nested = depth > 0;
    let mut level = Vec::new();

    while let Some(token) = iter.next() {
        if is_punctuation(&token, "(") && depth < MAX_NESTING_DEPTH {
            let mut inner = vec![token];
            inner.extend(nest_parentheses(iter, depth + 1));
            let kind = if starts_subquery(&inner) {
                GroupKind::Subquery
            } else {
                GroupKind::Parenthesis
            };
            level.push(SqlToken::Group(Group::new(kind, group_level(inner))));
        } else if nested && is_punctuation(&token, ")") {
            level.push(token);
            return level;
        } else {
            level.push(token);
        }
    }

    level
}

fn starts_subquery(inner: &[SqlToken]) -> bool {
    inner
        .iter()
        .skip(1)
        .find(|token| !token.is_whitespace())
        .is_some_and(|token| token.is_keyword("SELECT") || token.is_keyword("WITH"))
}

fn group_level(level: Vec<SqlToken>) -> Vec<SqlToken> {
    group_identifiers(group_functions(level))
}

/// Wraps `name(...)` into a function group whose first child is the callee.
///
/// A parameterized type (`AS DECIMAL(10,2)`, `::varchar(10)`) keeps its name
/// as a plain [`SqlToken::Name`], so it is never taken for a reference.
fn group_functions(level: Vec<SqlToken>) -> Vec<SqlToken> {
    let mut out: Vec<SqlToken> = Vec::with_capacity(level.len());

    for token in level {
        let SqlToken::Group(arguments) = token else {
            out.push(token);
            continue;
        };
        match out.pop() {
            Some(SqlToken::Name(name)) => {
                let callee = if previous_significant(&out).is_some_and(introduces_plain_name) {
                    SqlToken::Name(name)
                } else {
                    SqlToken::Identifier(name_identifier(name))
                };
                out.push(SqlToken::Group(Group::new(
                    GroupKind::Function,
                    vec![callee, SqlToken::Group(arguments)],
                )));
            }
            previous => {
                out.extend(previous);
                out.push(SqlToken::Group(arguments));
            }
        }
    }

    out
}

/// An identifier made of a single bare name.
fn name_identifier(text: String) -> Identifier {
    Identifier {
        real_name: Some(unquote_identifier(&text)),
        tokens: vec![SqlToken::Name(text)],
        kind: IdentifierKind::Column,
        qualifier: None,
        alias: None,
        alias_keyword: None,
    }
}

fn group_identifiers(level: Vec<SqlToken>) -> Vec<SqlToken> {
    let mut pending: VecDeque<SqlToken> = level.into();
    let mut out: Vec<SqlToken> = Vec::with_capacity(pending.len());

    while let Some(token) = pending.pop_front() {
        match token {
            SqlToken::Name(_) if previous_significant(&out).is_some_and(introduces_plain_name) => {
                out.push(token);
            }
            SqlToken::Name(_) => {
                let parts = take_chain(token, &mut pending);
                let (kind, real_name, qualifier) = describe_chain(&parts);
                let identifier = Identifier {
                    tokens: parts,
                    kind,
                    real_name,
                    qualifier,
                    alias: None,
                    alias_keyword: None,
                };
                out.push(SqlToken::Identifier(attach_alias(identifier, &mut pending)));
            }
            SqlToken::Group(group) if find_alias(&pending).is_some() => {
                let (kind, real_name) = match group.kind {
                    GroupKind::Function => (IdentifierKind::Call, callee_name(&group)),
                    GroupKind::Parenthesis | GroupKind::Subquery => {
                        (IdentifierKind::Expression, None)
                    }
                };
                let identifier = Identifier {
                    tokens: vec![SqlToken::Group(group)],
                    kind,
                    real_name,
                    qualifier: None,
                    alias: None,
                    alias_keyword: None,
                };
                out.push(SqlToken::Identifier(attach_alias(identifier, &mut pending)));
            }
            other => out.push(other),
        }
    }

    out
}

fn callee_name(function: &Group) -> Option<String> {
    match function.tokens.first() {
        Some(SqlToken::Identifier(callee)) => callee.real_name.clone(),
        _ => None,
    }
}

/// Consumes `.name`, `.*` and `.fn(...)` continuations directly after a name.
///
/// A keyword right after a dot is a name part (`t.order`).
fn take_chain(first: SqlToken, pending: &mut VecDeque<SqlToken>) -> Vec<SqlToken> {
    let mut parts = vec![first];

    while pending.front().is_some_and(|token| is_punctuation(token, ".")) {
        let terminal = match pending.get(1) {
            Some(SqlToken::Name(_)) => false,
            Some(SqlToken::Keyword(text)) if !text.contains(char::is_whitespace) => false,
            Some(SqlToken::Group(group)) if group.kind == GroupKind::Function => true,
            Some(token) if is_punctuation(token, "*") => true,
            _ => break,
        };
        parts.extend(pending.pop_front());
        match pending.pop_front() {
            Some(SqlToken::Keyword(text)) => parts.push(SqlToken::Name(text)),
            next => parts.extend(next),
        }
        if terminal {
            break;
        }
    }

    parts
}

/// Derives kind, real name and qualifier from a dotted chain.
fn describe_chain(parts: &[SqlToken]) -> (IdentifierKind, Option<String>, Option<String>) {
    let qualifier = (parts.len() > 2).then(|| {
        parts[..parts.len() - 2]
            .iter()
            .map(ToString::to_string)
            .collect::<String>()
    });

    match parts.last() {
        Some(SqlToken::Group(function)) if function.kind == GroupKind::Function => {
            (IdentifierKind::Call, callee_name(function), qualifier)
        }
        Some(token) if is_punctuation(token, "*") => {
            (IdentifierKind::Wildcard, Some("*".to_string()), qualifier)
        }
        Some(SqlToken::Name(name)) => (
            IdentifierKind::Column,
            Some(unquote_identifier(name)),
            qualifier,
        ),
        _ => (IdentifierKind::Column, None, qualifier),
    }
}

/// An alias found after a primary.
#[derive(Debug)]
struct AliasMatch {
    /// Tokens to consume, the alias name included.
    len: usize,
    /// The `AS` keyword as written, for explicit aliases.
    keyword: Option<String>,
}

/// Looks for `[ws] AS [ws] name` or `ws name` at the front of `pending`.
fn find_alias(pending: &VecDeque<SqlToken>) -> Option<AliasMatch> {
    let skip_whitespace = |mut cursor: usize| {
        while pending.get(cursor).is_some_and(SqlToken::is_whitespace) {
            cursor += 1;
        }
        cursor
    };
    let is_alias_name = |cursor: usize| {
        matches!(pending.get(cursor), Some(SqlToken::Name(_)))
            && !pending
                .get(cursor + 1)
                .is_some_and(|token| is_punctuation(token, ".") || is_punctuation(token, "::"))
    };

    let cursor = skip_whitespace(0);
    let token = pending.get(cursor)?;
    if token.is_keyword("AS") {
        let name_at = skip_whitespace(cursor + 1);
        return is_alias_name(name_at).then(|| AliasMatch {
            len: name_at + 1,
            keyword: Some(token.to_string()),
        });
    }

    // Implicit aliases need separating whitespace.
    (cursor > 0 && is_alias_name(cursor)).then_some(AliasMatch {
        len: cursor + 1,
        keyword: None,
    })
}

/// Moves the alias tokens, if any, from `pending` into `identifier`.
fn attach_alias(mut identifier: Identifier, pending: &mut VecDeque<SqlToken>) -> Identifier {
    let Some(alias) = find_alias(pending) else {
        return identifier;
    };

    identifier.tokens.extend(pending.drain(..alias.len - 1));
    if let Some(SqlToken::Name(name)) = pending.pop_front() {
        identifier.alias = Some(name.clone());
        identifier
            .tokens
            .push(SqlToken::Identifier(name_identifier(name)));
    }
    identifier.alias_keyword = alias.keyword;
    identifier
}

fn previous_significant(out: &[SqlToken]) -> Option<&SqlToken> {
    out.iter().rev().find(|token| !token.is_whitespace())
}

/// A name right after a standalone `AS` is an alias, and after `::` a type.
fn introduces_plain_name(token: &SqlToken) -> bool {
    token.is_keyword("AS") || is_punctuation(token, "::")
}
