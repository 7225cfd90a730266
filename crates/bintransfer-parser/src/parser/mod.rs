//! Hand-written recursive descent parser for the bintransfer schema language.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead
//! - `error`: ParseError
//! - `decl`: Item parsers (keyword-dispatched)
//! - `body`: Container bodies, properties and comments
//! - `types`: Names, type identifiers and `Vector<T>`
//!
//! Parsing is single-pass and fail-fast: the first grammar violation aborts
//! with one [`ParseError`]. The only lookahead beyond one token is used to
//! tell a type group (`type Name {`) from a declaration.

mod body;
mod decl;
mod error;
mod stream;
mod types;

/// Token utility functions for name extraction.
pub mod token_utils;

pub use error::{ParseError, ParseErrorKind};
use stream::TokenStream;

use bintransfer_ast::Schema;
use bintransfer_lexer::Token;
use std::ops::Range;

/// Parse a spanned token stream (as produced by `bintransfer_lexer::lex`)
/// into a schema tree.
///
/// # Parameters
/// - `tokens`: Slice of (token, byte_span) pairs, terminated by `Token::Eof`
///
/// # Returns
/// - `Ok(Schema)` if parsing succeeds
/// - `Err(ParseError)` on the first grammar violation
pub fn parse_schema(tokens: &[(Token, Range<usize>)]) -> Result<Schema, ParseError> {
    let mut stream = TokenStream::new(tokens);
    decl::parse_schema(&mut stream)
}
