//! Token stream wrapper for hand-written parser.

use bintransfer_ast::Span;
use bintransfer_lexer::Token;
use std::ops::Range;

/// Token stream with lookahead and position tracking.
///
/// Each token is paired with its byte span from the source, enabling
/// accurate error message locations. The stream is expected to end with
/// [`Token::Eof`], which is never consumed.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream from tokens with their byte spans.
    pub fn new(tokens: &'src [(Token, Range<usize>)]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    ///
    /// `Eof` is returned but never stepped over.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if matches!(token, Some(t) if *t != Token::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume the current token if it matches, reporting whether it did.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific token and advance if it matches.
    ///
    /// Returns an error if the token doesn't match.
    pub fn expect(&mut self, expected: Token) -> Result<Span, super::ParseError> {
        if self.check(&expected) {
            let span = self.current_span();
            self.advance();
            Ok(span)
        } else {
            Err(super::ParseError::expected_token(
                expected,
                self.peek().cloned(),
                self.current_span(),
            ))
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        matches!(self.peek(), None | Some(Token::Eof))
    }

    /// Get the current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Create a span from a starting position to the end of the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = self
            .tokens
            .get(start)
            .or_else(|| self.tokens.last())
            .map_or(0, |(_, span)| span.start);

        let end_byte = if self.pos > start {
            self.tokens
                .get(self.pos - 1)
                .map_or(start_byte, |(_, span)| span.end)
        } else {
            start_byte
        };

        Span::new(start_byte, end_byte)
    }

    /// Get a span for the current token.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos).or_else(|| self.tokens.last()) {
            Some((_, span)) => Span::from(span.clone()),
            None => Span::default(),
        }
    }

    /// Byte offset one past the final token.
    pub fn source_end(&self) -> usize {
        self.tokens.last().map_or(0, |(_, span)| span.end)
    }
}
