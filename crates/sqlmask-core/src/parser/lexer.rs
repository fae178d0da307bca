//! Flat tokenization on top of the `sqlparser` tokenizer.
//!
//! Every token keeps the exact slice of source text it was read from, so
//! whitespace, comments, quoting and keyword casing survive a rewrite.

use sqlparser::tokenizer::{Token, TokenWithSpan, Tokenizer};

use crate::error::{ParseError, ParseErrorKind};
use crate::token::SqlToken;
use crate::types::Dialect;

/// Words that structure a statement and never name a column or table.
///
/// Anything not listed here is treated as a name, which is what lets columns
/// called `user`, `name` or `status` be hashed even though `sqlparser` knows
/// them as keywords.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "COLLATE", "CREATE", "CROSS",
    "CUBE", "CURRENT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "ESCAPE", "EXCEPT",
    "EXISTS", "FALSE", "FETCH", "FILTER", "FIRST", "FOLLOWING", "FOR", "FROM", "FULL", "GROUP",
    "HAVING", "ILIKE", "IN", "INNER", "INSERT", "INTERSECT", "INTERVAL", "INTO", "IS", "JOIN",
    "LAST", "LATERAL", "LEFT", "LIKE", "LIMIT", "NATURAL", "NEXT", "NOT", "NOWAIT", "NULL",
    "NULLS", "OFFSET", "ON", "ONLY", "OR", "ORDER", "OUTER", "OVER", "PARTITION", "PRECEDING",
    "QUALIFY", "RANGE", "RECURSIVE", "REGEXP", "RETURNING", "RIGHT", "RLIKE", "ROLLUP", "ROW",
    "ROWS", "SELECT", "SET", "SIMILAR", "SOME", "TABLE", "THEN", "TOP", "TRUE", "UNBOUNDED",
    "UNION", "UPDATE", "USING", "VALUES", "WHEN", "WHERE", "WINDOW", "WITH", "WITHIN",
];

/// Keywords that fuse with a following `BY` into one keyword token.
const BY_PREFIXES: &[&str] = &["GROUP", "ORDER", "PARTITION"];

pub(crate) fn is_reserved_keyword(word: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(word))
}

/// A `sqlparser` token paired with the source text it covers.
#[derive(Debug, Clone)]
pub(crate) struct Lexeme {
    pub(crate) token: Token,
    pub(crate) text: String,
}

/// Tokenizes `sql`, attaching to each token the source text up to the next one.
///
/// Slicing between token starts (rather than relying on span ends) guarantees
/// the lexemes concatenate back to `sql` exactly.
pub(crate) fn lex(sql: &str, dialect: Dialect) -> Result<Vec<Lexeme>, ParseError> {
    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    let mut tokenizer = Tokenizer::new(sqlparser_dialect.as_ref(), sql);
    let tokens: Vec<TokenWithSpan> = tokenizer
        .tokenize_with_location()
        .map_err(|err| ParseError::from(err).with_dialect(dialect))?;

    let mut starts = Vec::with_capacity(tokens.len());
    let mut kept = Vec::with_capacity(tokens.len());
    for token in tokens {
        if matches!(token.token, Token::EOF) {
            continue;
        }
        let start = line_col_to_offset(
            sql,
            token.span.start.line as usize,
            token.span.start.column as usize,
        )
        .ok_or_else(|| out_of_range(&token, dialect))?;
        if starts.last().is_some_and(|previous| start < *previous) {
            return Err(out_of_range(&token, dialect));
        }
        starts.push(start);
        kept.push(token.token);
    }

    if starts.first().is_some_and(|first| *first != 0) {
        return Err(ParseError::new("token stream does not start at the beginning of the input")
            .with_dialect(dialect)
            .with_kind(ParseErrorKind::SpanOutOfRange));
    }

    let lexemes = kept
        .into_iter()
        .enumerate()
        .map(|(index, token)| {
            let start = starts[index];
            let end = starts.get(index + 1).copied().unwrap_or(sql.len());
            Lexeme {
                token,
                text: sql[start..end].to_string(),
            }
        })
        .collect();

    Ok(lexemes)
}

fn out_of_range(token: &TokenWithSpan, dialect: Dialect) -> ParseError {
    ParseError::with_position(
        format!("token {} has no matching source offset", token.token),
        token.span.start.line as usize,
        token.span.start.column as usize,
    )
    .with_dialect(dialect)
    .with_kind(ParseErrorKind::SpanOutOfRange)
}

/// Byte offset of a `sqlparser` location.
///
/// Lines and columns are 1-based and columns count characters. Column
/// `len + 1` addresses the end of its line.
fn line_col_to_offset(sql: &str, line: usize, column: usize) -> Option<usize> {
    let line_start = match line.checked_sub(2) {
        None if line == 1 => 0,
        None => return None,
        Some(skipped) => sql.match_indices('\n').nth(skipped)?.0 + 1,
    };
    let text = sql[line_start..].split('\n').next().unwrap_or_default();

    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .nth(column.checked_sub(1)?)
        .map(|offset| line_start + offset)
}

/// Maps lexemes to typed leaf tokens, fusing `GROUP BY`-style keyword pairs
/// and `:name` / `@name` bind parameters.
pub(crate) fn classify(lexemes: Vec<Lexeme>) -> Vec<SqlToken> {
    let mut out: Vec<SqlToken> = Vec::with_capacity(lexemes.len());
    let mut iter = lexemes.into_iter().peekable();

    while let Some(lexeme) = iter.next() {
        match &lexeme.token {
            Token::Colon | Token::AtSign => {
                let next_is_name = iter.peek().is_some_and(|next| {
                    matches!(&next.token, Token::Word(word) if word.quote_style.is_none())
                });
                if next_is_name {
                    let name = iter.next().map(|next| next.text).unwrap_or_default();
                    out.push(SqlToken::Placeholder(format!("{}{name}", lexeme.text)));
                    continue;
                }
                out.push(SqlToken::Punctuation(lexeme.text));
            }
            Token::Word(word)
                if word.quote_style.is_none()
                    && word.value.eq_ignore_ascii_case("BY")
                    && fuse_by_keyword(&mut out, &lexeme.text) => {}
            _ => out.push(classify_token(lexeme)),
        }
    }

    out
}

/// Appends `BY` to a preceding `GROUP`/`ORDER`/`PARTITION` keyword, absorbing
/// the plain whitespace in between. Returns false when there is nothing to fuse.
fn fuse_by_keyword(out: &mut Vec<SqlToken>, by_text: &str) -> bool {
    let keyword_index = out
        .iter()
        .rposition(|token| !matches!(token, SqlToken::Whitespace(text) if text.trim().is_empty()));
    let Some(keyword_index) = keyword_index else {
        return false;
    };
    let fuses = BY_PREFIXES
        .iter()
        .any(|prefix| out[keyword_index].is_keyword(prefix));
    if !fuses {
        return false;
    }

    let mut fused: String = out.drain(keyword_index..).map(|token| token.to_string()).collect();
    fused.push_str(by_text);
    out.push(SqlToken::Keyword(fused));
    true
}

fn classify_token(lexeme: Lexeme) -> SqlToken {
    let Lexeme { token, text } = lexeme;
    match token {
        Token::Word(word) if word.quote_style.is_none() && is_reserved_keyword(&word.value) => {
            SqlToken::Keyword(text)
        }
        Token::Word(word) if word.quote_style.is_none() && word.value.starts_with('@') => {
            SqlToken::Placeholder(text)
        }
        Token::Word(_) => SqlToken::Name(text),
        Token::Number(_, _)
        | Token::SingleQuotedString(_)
        | Token::DoubleQuotedString(_)
        | Token::NationalStringLiteral(_)
        | Token::EscapedStringLiteral(_)
        | Token::UnicodeStringLiteral(_)
        | Token::HexStringLiteral(_)
        | Token::DollarQuotedString(_) => SqlToken::Literal(text),
        Token::Placeholder(_) => SqlToken::Placeholder(text),
        Token::Whitespace(_) => SqlToken::Whitespace(text),
        _ => SqlToken::Punctuation(text),
    }
}
