//! Hand-written recursive descent parser for the bintransfer schema language
//!
//! Consumes the spanned token stream of `bintransfer-lexer` and produces the
//! `bintransfer-ast` tree.

pub mod parser;

pub use parser::{parse_schema, ParseError, ParseErrorKind};

// Re-export lexer
pub use bintransfer_lexer::Token;
