//! Pipeline errors and their rendering.

use bintransfer_ast::Span;
use bintransfer_compiler::CompileError;
use bintransfer_lexer::LexError;
use bintransfer_parser::ParseError;
use bintransfer_runtime::EngineError;
use thiserror::Error;

/// Result type for the facade API
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure from source text to bytes and back.
#[derive(Debug, Error)]
pub enum Error {
    #[error("schema source is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to serialize build context: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Source location for errors raised while reading schema text.
    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(Span::from(e.span.clone())),
            Error::Parse(e) => Some(e.span),
            Error::Compile(e) => Some(e.span),
            _ => None,
        }
    }
}

/// Render an error against the source it came from.
///
/// ```text
/// error: unexpected token "}", expected ":"
///   --> 1:20
///    |
///  1 | type User { user -> }
///    |                    ^
/// ```
///
/// Errors without a location render as their message alone.
pub fn format_error(source: &str, error: &Error) -> String {
    let mut output = format!("error: {}\n", error);
    let Some(span) = error.span() else {
        return output;
    };

    push_location(&mut output, source, span);
    if let Error::Compile(e) = error {
        for label in &e.labels {
            output.push_str(&format!("note: {}\n", label.message));
            push_location(&mut output, source, label.span);
        }
    }
    output
}

fn push_location(output: &mut String, source: &str, span: Span) {
    let (line, col) = span.line_col(source);
    let gutter = line.to_string().len();
    output.push_str(&format!("{:w$}--> {}:{}\n", "", line, col, w = gutter + 1));

    if let Some(text) = source.lines().nth(line - 1) {
        let width = span
            .snippet(source)
            .map_or(1, |s| s.lines().next().map_or(1, |l| l.chars().count().max(1)));
        output.push_str(&format!("{:w$} |\n", "", w = gutter));
        output.push_str(&format!("{} | {}\n", line, text));
        output.push_str(&format!(
            "{:w$} | {}{}\n",
            "",
            " ".repeat(col - 1),
            "^".repeat(width),
            w = gutter
        ));
    }
}
