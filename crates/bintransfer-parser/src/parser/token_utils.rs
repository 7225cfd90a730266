//! Token utility functions for name extraction.
//!
//! Keywords may appear wherever the grammar expects a plain name (a property
//! called `type`, a namespace called `alias`), so every name position goes
//! through [`name_of`].

use bintransfer_lexer::Token;

/// Text of a token usable as a name: identifiers and keywords.
///
/// # Examples
/// ```
/// use bintransfer_lexer::Token;
/// use bintransfer_parser::parser::token_utils::name_of;
///
/// assert_eq!(name_of(&Token::Ident("user".into())), Some("user".to_string()));
/// assert_eq!(name_of(&Token::Type), Some("type".to_string()));
/// assert_eq!(name_of(&Token::Colon), None);
/// ```
pub fn name_of(token: &Token) -> Option<String> {
    match token {
        Token::Ident(s) => Some(s.to_string()),
        other => other.keyword_str().map(str::to_string),
    }
}

/// Check if a token can be used as a name.
pub fn is_name(token: &Token) -> bool {
    matches!(token, Token::Ident(_)) || token.keyword_str().is_some()
}

/// Source-like text of a token, used to rebuild `--- ... ---` documentation.
///
/// String literals contribute their raw contents.
pub fn token_text(token: &Token) -> String {
    match token {
        Token::String(s) | Token::Comment(s) => s.to_string(),
        other => other.to_string(),
    }
}
