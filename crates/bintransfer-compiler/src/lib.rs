// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Schema compiler: AST to container model.
//!
//! Lowering happens in three passes over the tree:
//!
//! 1. **Aliases** - registered from every scope, then validated
//! 2. **Scopes** - namespaces compiled innermost-first, qualifying local
//!    references as each one closes
//! 3. **Finalization** - duplicate names rejected, CRC32 IDs assigned
//!
//! # Examples
//!
//! ```
//! # use bintransfer_ast::{Schema, Span};
//! # use bintransfer_compiler::compile;
//! let empty = Schema { body: Vec::new(), span: Span::default() };
//! assert!(compile(&empty).unwrap().is_empty());
//! ```

pub mod compiler;
pub mod docs;
pub mod error;
pub mod resolve;

pub use compiler::{SchemaCompiler, TraitInfo};
pub use error::{CompileError, CompileResult, ErrorKind};

use bintransfer_ast::Schema;
use bintransfer_model::Container;

/// Compile a schema with a fresh compiler.
pub fn compile(schema: &Schema) -> CompileResult<Vec<Container>> {
    SchemaCompiler::new().compile(schema)
}
