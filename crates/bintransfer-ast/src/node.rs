//! Syntax tree nodes.
//!
//! The tree mirrors the surface grammar closely: it records what was written,
//! including comments and the declaration order chosen by the author. Name
//! resolution, alias expansion and ID assignment all happen in the compiler.

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant over every node kind in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxKind {
    Schema,
    Namespace,
    TypeGroup,
    TypeGroupContainer,
    TypeDeclaration,
    TypeProperty,
    TypeIdentifier,
    Identifier,
    Vector,
    Literal,
    CommentBlock,
    GenericAlias,
    TraitDeclaration,
    TypeSizeSpecification,
}

/// Root of a parsed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub body: Vec<Item>,
    pub span: Span,
}

/// Anything that may appear at the top level or inside a namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Comment(CommentBlock),
    Namespace(Namespace),
    TypeGroup(TypeGroup),
    Alias(GenericAlias),
    Trait(TraitDeclaration),
    Declaration(TypeDeclaration),
}

impl Item {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Item::Comment(_) => SyntaxKind::CommentBlock,
            Item::Namespace(_) => SyntaxKind::Namespace,
            Item::TypeGroup(_) => SyntaxKind::TypeGroup,
            Item::Alias(_) => SyntaxKind::GenericAlias,
            Item::Trait(_) => SyntaxKind::TraitDeclaration,
            Item::Declaration(_) => SyntaxKind::TypeDeclaration,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Item::Comment(c) => c.span,
            Item::Namespace(n) => n.span,
            Item::TypeGroup(g) => g.span,
            Item::Alias(a) => a.span,
            Item::Trait(t) => t.span,
            Item::Declaration(d) => d.span,
        }
    }
}

/// `// ...`, `/* ... */` or `--- ... ---` comment, with delimiters stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBlock {
    pub text: String,
    pub span: Span,
}

/// `namespace name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: Identifier,
    pub body: Vec<Item>,
    pub span: Span,
}

/// `type Name implements A, B { member ... }`
///
/// Every member shares the group's type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeGroup {
    pub name: Identifier,
    pub traits: Vec<TypePath>,
    pub body: Vec<GroupMember>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GroupMember {
    Comment(CommentBlock),
    Container(TypeGroupContainer),
}

/// One constructor inside a type group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeGroupContainer {
    pub name: TypePath,
    pub body: Vec<BodyEntry>,
    pub span: Span,
}

/// Stand-alone container: `ctor : Type { ... }` or `Type ctor -> ...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Constructor name
    pub ctor: TypePath,
    /// Type name
    pub name: TypePath,
    pub body: Vec<BodyEntry>,
    pub span: Span,
}

/// Entry of a container body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyEntry {
    Comment(CommentBlock),
    Property(TypeProperty),
}

/// `key?: ReturnType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeProperty {
    pub key: Identifier,
    pub optional: bool,
    pub return_type: ReturnType,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReturnType {
    Type(TypeIdentifier),
    Vector(Vector),
}

/// `Vector<Item>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub item: TypeIdentifier,
    pub span: Span,
}

/// A type reference: dotted path or sized generic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeIdentifier {
    Path(TypePath),
    Sized(TypeSizeSpecification),
}

impl TypeIdentifier {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            TypeIdentifier::Path(_) => SyntaxKind::TypeIdentifier,
            TypeIdentifier::Sized(_) => SyntaxKind::TypeSizeSpecification,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeIdentifier::Path(p) => p.span,
            TypeIdentifier::Sized(s) => s.span,
        }
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeIdentifier::Path(p) => write!(f, "{}", p),
            TypeIdentifier::Sized(s) => write!(f, "{}[{}]", s.name.name, s.size.value),
        }
    }
}

/// Dotted name: `posts.Comment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePath {
    pub segments: Vec<Identifier>,
    pub span: Span,
}

impl TypePath {
    /// Segments joined with `.`.
    pub fn dotted(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Whether this is a single undotted identifier.
    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// `name[size]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSizeSpecification {
    pub name: Identifier,
    pub size: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// Integer literal (only sizes use literals in the grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub value: u64,
    pub span: Span,
}

/// `alias Name = target;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericAlias {
    pub name: Identifier,
    pub target: TypeIdentifier,
    pub span: Span,
}

/// `trait Name;` or `trait Name { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDeclaration {
    pub name: Identifier,
    pub body: Vec<BodyEntry>,
    pub span: Span,
}
