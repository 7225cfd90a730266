// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the bintransfer schema language.
//!
//! This crate tokenizes schema source text using logos.
//!
//! # Design
//!
//! - `Token` — every token of the language (keywords, punctuators, literals, identifiers, comments)
//! - Comments are first-class tokens: the parser turns them into documentation
//! - [`lex`] produces a flat `(Token, byte_range)` stream terminated by a single [`Token::Eof`]
//!
//! # Examples
//!
//! ```
//! # use bintransfer_lexer::*;
//! let tokens = lex("user : User -> id: uint;").unwrap();
//! assert_eq!(tokens[0].0, Token::Ident("user".into()));
//! assert_eq!(tokens.last().unwrap().0, Token::Eof);
//! ```

use logos::Logos;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

/// A token paired with its byte range in the source text.
pub type Spanned = (Token, Range<usize>);

/// Schema language token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\n\r\x0B\x0C\x{A0}\x{1680}\x{180E}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+")]
pub enum Token {
    // === Keywords ===
    /// Keyword `namespace`
    #[token("namespace")]
    Namespace,
    /// Keyword `type`
    #[token("type")]
    Type,
    /// Keyword `alias`
    #[token("alias")]
    Alias,
    /// Keyword `trait`
    #[token("trait")]
    Trait,
    /// Keyword `implements`
    #[token("implements")]
    Implements,

    // === Literals ===
    /// `true` or `false`
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Boolean(bool),

    /// `null`
    #[token("null")]
    Null,

    /// Decimal (`42`) or hexadecimal (`0xff`) integer literal
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    #[regex(r"0x[0-9a-fA-F]*", lex_hex_literal)]
    Integer(u64),

    /// Floating point literal: `31.3193`
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// String literal delimited by `'` or `"`, no escape processing
    #[token("\"", lex_string_literal)]
    #[token("'", lex_string_literal)]
    String(Rc<str>),

    /// Identifier
    #[regex(
        r"(?:[$_A-Za-z\\]|[^\x00-\x7F\s\x{180E}\x{FEFF}])(?:[$_A-Za-z0-9\\]|[^\x00-\x7F\s\x{180E}\x{FEFF}])*",
        |lex| Rc::from(lex.slice())
    )]
    Ident(Rc<str>),

    /// `// line` or `/* block */` comment, carrying the text between the delimiters
    #[regex(r"//[^\n\r\x{2028}\x{2029}]*", |lex| Rc::from(&lex.slice()[2..]))]
    #[token("/*", lex_block_comment)]
    Comment(Rc<str>),

    // === Punctuators ===
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token("->")]
    Arrow,
    /// Stray block comment terminator
    #[token("*/")]
    CommentEnd,
    /// `---` delimiter of legacy documentation blocks
    #[token("---")]
    TripleDash,

    /// End of input. Never produced by logos, appended by [`lex`].
    Eof,
}

/// Category of a token, mirroring the token types exposed to tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Boolean,
    Numeric,
    String,
    Null,
    Identifier,
    Punctuator,
    Keyword,
    Comment,
    Eof,
}

impl Token {
    /// Token category.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Namespace | Token::Type | Token::Alias | Token::Trait | Token::Implements => {
                TokenKind::Keyword
            }
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Null => TokenKind::Null,
            Token::Integer(_) | Token::Float(_) => TokenKind::Numeric,
            Token::String(_) => TokenKind::String,
            Token::Ident(_) => TokenKind::Identifier,
            Token::Comment(_) => TokenKind::Comment,
            Token::Eof => TokenKind::Eof,
            _ => TokenKind::Punctuator,
        }
    }

    /// Text of a keyword token, used where keywords may serve as plain names.
    pub fn keyword_str(&self) -> Option<&'static str> {
        match self {
            Token::Namespace => Some("namespace"),
            Token::Type => Some("type"),
            Token::Alias => Some("alias"),
            Token::Trait => Some("trait"),
            Token::Implements => Some("implements"),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Token::Boolean(b) => return write!(f, "{}", b),
            Token::Integer(n) => return write!(f, "{}", n),
            Token::Float(x) => return write!(f, "{}", x),
            Token::String(s) => return write!(f, "\"{}\"", s),
            Token::Ident(id) => return write!(f, "{}", id),
            Token::Comment(text) => return write!(f, "comment {:?}", text),
            Token::Null => "null",
            Token::Namespace => "namespace",
            Token::Type => "type",
            Token::Alias => "alias",
            Token::Trait => "trait",
            Token::Implements => "implements",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Colon => ":",
            Token::Dot => ".",
            Token::Eq => "=",
            Token::Semicolon => ";",
            Token::Comma => ",",
            Token::Question => "?",
            Token::Arrow => "->",
            Token::CommentEnd => "*/",
            Token::TripleDash => "---",
            Token::Eof => "end of input",
        };
        f.write_str(s)
    }
}

/// Category of lexical failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// Character sequence that starts no token
    #[default]
    InvalidToken,
    /// `/*` without a closing `*/`
    UnterminatedComment,
    /// Quote without its matching closing quote
    UnterminatedString,
    /// `0x` with no digits, too many digits, or directly followed by an identifier
    MalformedHexLiteral,
}

/// Lexical error with the byte range of the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Range<usize>,
    pub message: String,
}

impl LexError {
    fn new(kind: LexErrorKind, span: Range<usize>, source: &str) -> Self {
        let text = source.get(span.clone()).unwrap_or_default();
        let message = match kind {
            LexErrorKind::InvalidToken => {
                format!("unexpected token at {} (token: {})", span.start, text)
            }
            LexErrorKind::UnterminatedComment => {
                format!("unterminated block comment starting at {}", span.start)
            }
            LexErrorKind::UnterminatedString => {
                format!("unterminated string literal starting at {}", span.start)
            }
            LexErrorKind::MalformedHexLiteral => {
                format!("malformed hex literal at {} (token: {})", span.start, text)
            }
        };
        Self {
            kind,
            span,
            message,
        }
    }
}

/// Tokenize `source` eagerly.
///
/// Whitespace is skipped. The returned stream always ends with exactly one
/// [`Token::Eof`] whose range is empty and sits at the end of the input.
pub fn lex(source: &str) -> Result<Vec<Spanned>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(kind) => return Err(LexError::new(kind, span, source)),
        }
    }

    tokens.push((Token::Eof, source.len()..source.len()));
    Ok(tokens)
}

/// Whether `c` may start an identifier.
pub fn is_identifier_start(c: char) -> bool {
    matches!(c, '$' | '_' | 'A'..='Z' | 'a'..='z' | '\\') || (!c.is_ascii() && !is_whitespace(c))
}

/// Whether `c` may continue an identifier.
pub fn is_identifier_part(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{180E}' || c == '\u{FEFF}'
}

fn lex_hex_literal(lex: &mut logos::Lexer<'_, Token>) -> Result<u64, LexErrorKind> {
    let digits = &lex.slice()[2..];
    if digits.is_empty() || lex.remainder().starts_with(is_identifier_start) {
        return Err(LexErrorKind::MalformedHexLiteral);
    }
    u64::from_str_radix(digits, 16).map_err(|_| LexErrorKind::MalformedHexLiteral)
}

fn lex_string_literal(lex: &mut logos::Lexer<'_, Token>) -> Result<Rc<str>, LexErrorKind> {
    let quote = lex.slice();
    let rest = lex.remainder();
    match rest.find(quote) {
        Some(end) => {
            let value = Rc::from(&rest[..end]);
            lex.bump(end + quote.len());
            Ok(value)
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedString)
        }
    }
}

fn lex_block_comment(lex: &mut logos::Lexer<'_, Token>) -> Result<Rc<str>, LexErrorKind> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(end) => {
            let text = Rc::from(&rest[..end]);
            lex.bump(end + 2);
            Ok(text)
        }
        None => {
            lex.bump(rest.len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}
