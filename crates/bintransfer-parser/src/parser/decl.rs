//! Item parsers (keyword-dispatched).
//!
//! Items are everything that may appear at the top level or inside a
//! namespace: comments, namespaces, type groups, aliases, traits and plain
//! container declarations.

use super::body::{parse_brace_body, parse_comment, parse_container_body};
use super::types::{parse_name, parse_path, parse_type_identifier};
use super::{ParseError, TokenStream};
use bintransfer_ast::{
    GenericAlias, GroupMember, Item, Namespace, Schema, TraitDeclaration, TypeDeclaration,
    TypeGroup, TypeGroupContainer,
};
use bintransfer_lexer::Token;

/// Parse every item up to the end of input.
pub fn parse_schema(stream: &mut TokenStream) -> Result<Schema, ParseError> {
    let mut body = Vec::new();
    while !stream.at_end() {
        body.push(parse_item(stream)?);
    }
    Ok(Schema {
        body,
        span: bintransfer_ast::Span::new(0, stream.source_end()),
    })
}

/// Parse a single item.
fn parse_item(stream: &mut TokenStream) -> Result<Item, ParseError> {
    if let Some(comment) = parse_comment(stream)? {
        return Ok(Item::Comment(comment));
    }

    match stream.peek() {
        Some(Token::Namespace) => parse_namespace(stream).map(Item::Namespace),
        Some(Token::Type) if is_type_group(stream) => parse_type_group(stream).map(Item::TypeGroup),
        Some(Token::Alias) => parse_alias(stream).map(Item::Alias),
        Some(Token::Trait) => parse_trait(stream).map(Item::Trait),
        Some(token) if super::token_utils::is_name(token) => {
            parse_type_declaration(stream).map(Item::Declaration)
        }
        other => Err(ParseError::unexpected_token(
            other,
            "at declaration",
            stream.current_span(),
        )),
    }
}

/// `type Name {` or `type Name implements`; anything else after `type` is a
/// declaration whose first name happens to be `type`.
fn is_type_group(stream: &TokenStream) -> bool {
    matches!(stream.peek_nth(1), Some(t) if super::token_utils::is_name(t))
        && matches!(
            stream.peek_nth(2),
            Some(Token::LBrace) | Some(Token::Implements)
        )
}

/// `namespace name { item* }`
fn parse_namespace(stream: &mut TokenStream) -> Result<Namespace, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Namespace)?;
    let name = parse_name(stream, "at namespace name")?;
    stream.expect(Token::LBrace)?;

    let mut body = Vec::new();
    while !stream.check(&Token::RBrace) {
        if stream.at_end() {
            return Err(ParseError::expected_token(
                Token::RBrace,
                stream.peek().cloned(),
                stream.current_span(),
            ));
        }
        body.push(parse_item(stream)?);
    }
    stream.expect(Token::RBrace)?;

    Ok(Namespace {
        name,
        body,
        span: stream.span_from(start),
    })
}

/// `type Name (implements A, B)? { member* }`
fn parse_type_group(stream: &mut TokenStream) -> Result<TypeGroup, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Type)?;
    let name = parse_name(stream, "at type name")?;

    let mut traits = Vec::new();
    if stream.eat(&Token::Implements) {
        loop {
            traits.push(parse_path(stream)?);
            if !stream.eat(&Token::Comma) {
                break;
            }
        }
    }

    stream.expect(Token::LBrace)?;
    let mut body = Vec::new();
    while !stream.check(&Token::RBrace) {
        if let Some(comment) = parse_comment(stream)? {
            body.push(GroupMember::Comment(comment));
            continue;
        }
        if stream.at_end() {
            return Err(ParseError::expected_token(
                Token::RBrace,
                stream.peek().cloned(),
                stream.current_span(),
            ));
        }
        body.push(GroupMember::Container(parse_group_container(stream)?));
    }
    stream.expect(Token::RBrace)?;

    Ok(TypeGroup {
        name,
        traits,
        body,
        span: stream.span_from(start),
    })
}

/// Group member: `name`, `name { ... }` or `name -> ...`.
fn parse_group_container(stream: &mut TokenStream) -> Result<TypeGroupContainer, ParseError> {
    let start = stream.current_pos();
    let name = parse_path(stream)?;
    let body = parse_container_body(stream)?;

    Ok(TypeGroupContainer {
        name,
        body,
        span: stream.span_from(start),
    })
}

/// `alias Name = typeIdentifier;` with the `;` optional.
fn parse_alias(stream: &mut TokenStream) -> Result<GenericAlias, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Alias)?;
    let name = parse_name(stream, "at alias name")?;
    stream.expect(Token::Eq)?;
    let target = parse_type_identifier(stream)?;
    stream.eat(&Token::Semicolon);

    Ok(GenericAlias {
        name,
        target,
        span: stream.span_from(start),
    })
}

/// `trait Name;` or `trait Name { body }`
fn parse_trait(stream: &mut TokenStream) -> Result<TraitDeclaration, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::Trait)?;
    let name = parse_name(stream, "at trait name")?;

    let body = match stream.peek() {
        Some(Token::LBrace) => parse_brace_body(stream)?,
        Some(Token::Semicolon) => {
            stream.advance();
            Vec::new()
        }
        other => {
            return Err(ParseError::unexpected_token(
                other,
                "after trait name, expected \"{\" or \";\"",
                stream.current_span(),
            ))
        }
    };

    Ok(TraitDeclaration {
        name,
        body,
        span: stream.span_from(start),
    })
}

/// `ctor : Type body` or the positional `Type ctor body`.
fn parse_type_declaration(stream: &mut TokenStream) -> Result<TypeDeclaration, ParseError> {
    let start = stream.current_pos();
    let first = parse_path(stream)?;

    let (ctor, name) = if stream.eat(&Token::Colon) {
        let type_name = parse_path(stream)?;
        (first, type_name)
    } else {
        let ctor = parse_path(stream)?;
        (ctor, first)
    };

    let body = parse_container_body(stream)?;

    Ok(TypeDeclaration {
        ctor,
        name,
        body,
        span: stream.span_from(start),
    })
}
