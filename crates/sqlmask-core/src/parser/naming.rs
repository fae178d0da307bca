//! Identifier quoting helpers.

/// Returns true when `part` is wrapped in a matching pair of identifier quotes.
pub fn is_quoted_identifier(part: &str) -> bool {
    let trimmed = part.trim();
    let mut chars = trimmed.chars();
    let (Some(first), Some(last)) = (chars.next(), chars.next_back()) else {
        return false;
    };
    matches!(
        (first, last),
        ('"', '"') | ('`', '`') | ('[', ']') | ('\'', '\'')
    )
}

/// Strips one level of identifier quotes: `"Col"` becomes `Col`.
pub fn unquote_identifier(part: &str) -> String {
    let trimmed = part.trim();
    if is_quoted_identifier(trimmed) {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}
