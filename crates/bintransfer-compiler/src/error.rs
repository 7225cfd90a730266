//! Compile-time error reporting.
//!
//! Errors carry the span of the offending node and, where a second location
//! is relevant (the first of two duplicate definitions), a labeled span.
//!
//! # Examples
//!
//! ```
//! # use bintransfer_compiler::error::*;
//! # use bintransfer_ast::Span;
//! let error = CompileError::new(
//!     ErrorKind::DuplicateAlias,
//!     Span::new(20, 24),
//!     "duplicate alias \"Hash\"".to_string(),
//! );
//! assert_eq!(error.to_string(), "duplicate alias: duplicate alias \"Hash\"");
//! ```

use bintransfer_ast::Span;
use std::fmt;

/// Compilation diagnostic with source location and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Category of this error
    pub kind: ErrorKind,
    /// Primary source location
    pub span: Span,
    /// Primary error message
    pub message: String,
    /// Additional labeled spans
    pub labels: Vec<Label>,
}

/// Category of compilation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Alias name declared twice, in any scopes
    DuplicateAlias,
    /// Two containers resolve to the same fully-qualified name
    DuplicateContainerName,
    /// `[N]` on a generic other than `string`/`bytes`, or `N` out of range
    InvalidStrictSize,
    /// Alias whose target does not end in a generic type
    InvalidAliasTarget,
    /// Alias chain that refers back to itself
    AliasCycle,
    /// `[N]` applied to a name that is not a generic type
    UnresolvedGenericType,
    /// `Vector<T[N]>`: vector items cannot carry a size
    InvalidVectorItem,
}

/// Secondary labeled span in a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Source location
    pub span: Span,
    /// Label text
    pub message: String,
}

impl CompileError {
    /// Creates a new error diagnostic.
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            labels: Vec::new(),
        }
    }

    /// Adds a secondary labeled span (e.g., "first defined here").
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            message: message.into(),
        });
        self
    }
}

impl ErrorKind {
    /// Returns a human-readable name for this error kind.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::DuplicateAlias => "duplicate alias",
            ErrorKind::DuplicateContainerName => "duplicate container name",
            ErrorKind::InvalidStrictSize => "invalid strict size",
            ErrorKind::InvalidAliasTarget => "invalid alias target",
            ErrorKind::AliasCycle => "alias cycle",
            ErrorKind::UnresolvedGenericType => "unresolved generic type",
            ErrorKind::InvalidVectorItem => "invalid vector item",
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)
    }
}

impl std::error::Error for CompileError {}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
