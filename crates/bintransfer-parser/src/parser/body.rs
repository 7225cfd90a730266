//! Container bodies, properties and comment blocks.

use super::token_utils::token_text;
use super::types::{parse_name, parse_return_type};
use super::{ParseError, TokenStream};
use bintransfer_ast::{BodyEntry, CommentBlock, TypeProperty};
use bintransfer_lexer::Token;

/// Parse a comment token or a `--- ... ---` block, if one is next.
pub fn parse_comment(stream: &mut TokenStream) -> Result<Option<CommentBlock>, ParseError> {
    match stream.peek() {
        Some(Token::Comment(text)) => {
            let span = stream.current_span();
            stream.advance();
            Ok(Some(CommentBlock {
                text: text.to_string(),
                span,
            }))
        }
        Some(Token::TripleDash) => parse_dash_block(stream).map(Some),
        _ => Ok(None),
    }
}

/// `--- free words ---`: token values joined with single spaces.
fn parse_dash_block(stream: &mut TokenStream) -> Result<CommentBlock, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::TripleDash)?;

    let mut words = Vec::new();
    loop {
        match stream.peek() {
            Some(Token::TripleDash) => break,
            Some(Token::Eof) | None => {
                return Err(ParseError::expected_token(
                    Token::TripleDash,
                    stream.peek().cloned(),
                    stream.current_span(),
                ))
            }
            Some(token) => {
                words.push(token_text(token));
                stream.advance();
            }
        }
    }
    stream.advance(); // consume closing '---'

    Ok(CommentBlock {
        text: words.join(" "),
        span: stream.span_from(start),
    })
}

/// Parse the body following a container name.
///
/// Accepts `{ ... }`, `-> ...` or nothing at all (with an optional `;`).
pub fn parse_container_body(stream: &mut TokenStream) -> Result<Vec<BodyEntry>, ParseError> {
    match stream.peek() {
        Some(Token::LBrace) => parse_brace_body(stream),
        Some(Token::Arrow) => parse_short_body(stream),
        _ => {
            stream.eat(&Token::Semicolon);
            Ok(Vec::new())
        }
    }
}

/// `{ key: T; other?: U; }` where the last `;` may be omitted.
pub fn parse_brace_body(stream: &mut TokenStream) -> Result<Vec<BodyEntry>, ParseError> {
    stream.expect(Token::LBrace)?;
    let mut entries = Vec::new();

    while !stream.check(&Token::RBrace) {
        if let Some(comment) = parse_comment(stream)? {
            entries.push(BodyEntry::Comment(comment));
            continue;
        }
        if stream.at_end() {
            return Err(ParseError::expected_token(
                Token::RBrace,
                stream.peek().cloned(),
                stream.current_span(),
            ));
        }

        entries.push(BodyEntry::Property(parse_property(stream)?));
        while let Some(comment) = parse_comment(stream)? {
            entries.push(BodyEntry::Comment(comment));
        }
        if !stream.check(&Token::RBrace) {
            stream.expect(Token::Semicolon)?;
        }
    }

    stream.expect(Token::RBrace)?;
    Ok(entries)
}

/// `-> key: T, other?: U;` where the trailing `;` is optional.
pub fn parse_short_body(stream: &mut TokenStream) -> Result<Vec<BodyEntry>, ParseError> {
    stream.expect(Token::Arrow)?;
    let mut entries = Vec::new();

    if stream.eat(&Token::Semicolon) {
        return Ok(entries);
    }

    loop {
        while let Some(comment) = parse_comment(stream)? {
            entries.push(BodyEntry::Comment(comment));
        }
        entries.push(BodyEntry::Property(parse_property(stream)?));
        if !stream.eat(&Token::Comma) {
            break;
        }
    }

    stream.eat(&Token::Semicolon);
    Ok(entries)
}

/// `key?: ReturnType`
pub fn parse_property(stream: &mut TokenStream) -> Result<TypeProperty, ParseError> {
    let start = stream.current_pos();
    let key = parse_name(stream, "at property name")?;
    let optional = stream.eat(&Token::Question);
    stream.expect(Token::Colon)?;
    let return_type = parse_return_type(stream)?;

    Ok(TypeProperty {
        key,
        optional,
        return_type,
        span: stream.span_from(start),
    })
}
