// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! # bintransfer
//!
//! Schema-driven binary serialization.
//!
//! This crate is a facade over the pipeline crates:
//! - `bintransfer-lexer` - Tokenization
//! - `bintransfer-parser` - Hand-written recursive descent parser
//! - `bintransfer-compiler` - AST to container model, CRC32 IDs
//! - `bintransfer-codec` - Little-endian wire primitives
//! - `bintransfer-runtime` - Model-driven encoder and decoder
//!
//! ```text
//! source --lex--> tokens --parse--> AST --compile--> ModelSet
//!                                                      |
//!                         object graph <--Schema--> bytes
//! ```
//!
//! ## Usage
//!
//! ```
//! use bintransfer::{compile_schema, Schema, Value};
//!
//! let model = compile_schema("type User { user -> id: uint, name: string }").unwrap();
//! let schema = Schema::new(&[model]).unwrap();
//!
//! let bytes = schema.encode(&Value::tagged("user").with("id", 100)).unwrap();
//! let user = schema.decode(&bytes).unwrap();
//! assert_eq!(user.get("_type"), Some(&Value::from("User")));
//! ```

pub mod builder;
pub mod error;

pub use bintransfer_ast as ast;
pub use bintransfer_codec as codec;
pub use bintransfer_lexer as lexer;
pub use bintransfer_parser as parser;

pub use bintransfer_compiler::{CompileError, ErrorKind, SchemaCompiler, TraitInfo};
pub use bintransfer_model::{Container, GenericType, ModelSet, Param, ParamFlags};
pub use bintransfer_runtime::{EngineConfig, EngineError, Object, Schema, Value};
pub use builder::{build_plan, render_plan, SourceUnit, TemplateRenderer, UnitKind};
pub use error::{format_error, Error, Result};

use indexmap::IndexMap;
use tracing::debug;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Source text to compiled model.
///
/// Alias and trait tables live on the parser and are reset on every call,
/// so one parser can compile unrelated sources in turn.
#[derive(Debug, Default)]
pub struct SchemaParser {
    compiler: SchemaCompiler,
}

impl SchemaParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex, parse and compile `source`.
    pub fn parse(&mut self, source: &str) -> Result<ModelSet> {
        let tree = parse_tree(source)?;
        let containers = self.compiler.compile(&tree)?;
        debug!(containers = containers.len(), "schema compiled");
        Ok(ModelSet::new(containers))
    }

    /// [`SchemaParser::parse`] over UTF-8 bytes.
    pub fn parse_bytes(&mut self, source: &[u8]) -> Result<ModelSet> {
        self.parse(std::str::from_utf8(source)?)
    }

    /// Traits declared by the last parsed source.
    pub fn traits(&self) -> &IndexMap<String, TraitInfo> {
        self.compiler.traits()
    }
}

/// Lex and parse `source` without compiling it.
pub fn parse_tree(source: &str) -> Result<ast::Schema> {
    let tokens = lexer::lex(source)?;
    Ok(parser::parse_schema(&tokens)?)
}

/// Compile one source with a fresh parser.
pub fn compile_schema(source: &str) -> Result<ModelSet> {
    SchemaParser::new().parse(source)
}

/// Compile several sources and merge them into one engine.
pub fn load_schema(sources: &[&str], config: EngineConfig) -> Result<Schema> {
    let mut parser = SchemaParser::new();
    let sets = sources
        .iter()
        .map(|source| parser.parse(source))
        .collect::<Result<Vec<_>>>()?;
    Ok(Schema::with_config(&sets, config)?)
}
