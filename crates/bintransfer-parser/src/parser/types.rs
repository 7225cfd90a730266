//! Names, type identifiers and return types.

use super::token_utils::name_of;
use super::{ParseError, TokenStream};
use bintransfer_ast::{Identifier, Literal, ReturnType, TypeIdentifier, TypePath, TypeSizeSpecification, Vector};
use bintransfer_lexer::Token;

/// Parse a single name (identifier or keyword).
pub fn parse_name(stream: &mut TokenStream, context: &str) -> Result<Identifier, ParseError> {
    let span = stream.current_span();
    match stream.peek() {
        Some(token) => match name_of(token) {
            Some(name) => {
                stream.advance();
                Ok(Identifier::new(name, span))
            }
            None => Err(ParseError::unexpected_token(Some(token), context, span)),
        },
        None => Err(ParseError::unexpected_token(None, context, span)),
    }
}

/// Parse a path (dot-separated names).
pub fn parse_path(stream: &mut TokenStream) -> Result<TypePath, ParseError> {
    let start = stream.current_pos();
    let mut segments = vec![parse_name(stream, "in type name")?];

    while stream.eat(&Token::Dot) {
        segments.push(parse_name(stream, "in type name")?);
    }

    Ok(TypePath {
        segments,
        span: stream.span_from(start),
    })
}

/// Parse a type identifier: `a.b.C` or `name[INTEGER]`.
pub fn parse_type_identifier(stream: &mut TokenStream) -> Result<TypeIdentifier, ParseError> {
    let start = stream.current_pos();
    let path = parse_path(stream)?;

    if !stream.check(&Token::LBracket) {
        return Ok(TypeIdentifier::Path(path));
    }

    if !path.is_simple() {
        return Err(ParseError::invalid_syntax(
            format!("size specification is not allowed on dotted type \"{}\"", path),
            stream.current_span(),
        ));
    }
    stream.advance(); // consume '['

    let size_span = stream.current_span();
    let size = match stream.peek() {
        Some(Token::Integer(value)) => {
            let value = *value;
            stream.advance();
            Literal {
                value,
                span: size_span,
            }
        }
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "in size specification, expected integer",
                size_span,
            ))
        }
    };
    stream.expect(Token::RBracket)?;

    let name = path
        .segments
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::other("empty type path", size_span))?;

    Ok(TypeIdentifier::Sized(TypeSizeSpecification {
        name,
        size,
        span: stream.span_from(start),
    }))
}

/// Parse a property return type: `Vector<T>` or a type identifier.
pub fn parse_return_type(stream: &mut TokenStream) -> Result<ReturnType, ParseError> {
    let is_vector = matches!(stream.peek(), Some(Token::Ident(name)) if &**name == "Vector")
        && matches!(stream.peek_nth(1), Some(Token::Lt));

    if !is_vector {
        return Ok(ReturnType::Type(parse_type_identifier(stream)?));
    }

    let start = stream.current_pos();
    stream.advance(); // consume 'Vector'
    stream.expect(Token::Lt)?;
    let item = parse_type_identifier(stream)?;
    stream.expect(Token::Gt)?;

    Ok(ReturnType::Vector(Vector {
        item,
        span: stream.span_from(start),
    }))
}
