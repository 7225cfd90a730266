//! Parse error types.

use bintransfer_ast::Span;
use bintransfer_lexer::Token;
use std::fmt;

/// Parse error with source location and context.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Kind of parse error
    pub kind: ParseErrorKind,
    /// Source location where error occurred
    pub span: Span,
    /// Human-readable error message
    pub message: String,
}

/// Category of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected token encountered where a specific token was expected.
    ///
    /// Example: expected `:` after a property name, found `;`.
    UnexpectedToken,

    /// Input ended while a construct was still open.
    ///
    /// Example: reached end of input inside `namespace a { ...`.
    UnexpectedEof,

    /// Tokens are present but violate a grammar rule.
    ///
    /// Example: a size specification on a dotted path, `a.b[4]`.
    InvalidSyntax,

    /// Other parse error not covered by specific categories.
    Other,
}

fn is_eof(token: Option<&Token>) -> bool {
    matches!(token, None | Some(Token::Eof))
}

impl ParseError {
    /// Create an "expected token" error.
    pub fn expected_token(expected: Token, found: Option<Token>, span: Span) -> Self {
        let message = match &found {
            Some(token) if *token != Token::Eof => {
                format!("unexpected token \"{}\", expected \"{}\"", token, expected)
            }
            _ => format!("unexpected end of input, expected \"{}\"", expected),
        };
        Self {
            kind: if is_eof(found.as_ref()) {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "unexpected token" error.
    pub fn unexpected_token(found: Option<&Token>, context: &str, span: Span) -> Self {
        let message = match found {
            Some(token) if *token != Token::Eof => {
                format!("unexpected token \"{}\" {}", token, context)
            }
            _ => format!("unexpected end of input {}", context),
        };
        Self {
            kind: if is_eof(found) {
                ParseErrorKind::UnexpectedEof
            } else {
                ParseErrorKind::UnexpectedToken
            },
            span,
            message,
        }
    }

    /// Create an "invalid syntax" error.
    pub fn invalid_syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::InvalidSyntax,
            span,
            message: message.into(),
        }
    }

    /// Create a generic parse error.
    pub fn other(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Other,
            span,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.span.start)
    }
}

impl std::error::Error for ParseError {}
