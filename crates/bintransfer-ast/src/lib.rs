// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! AST types for the bintransfer schema language
//!
//! This crate contains the syntax tree produced by `bintransfer-parser` and
//! consumed by `bintransfer-compiler`, plus the `Span` source location type.

pub mod node;
pub mod span;

pub use node::*;
pub use span::Span;

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name, Span::default())
    }

    #[test]
    fn test_type_path_dotted() {
        let path = TypePath {
            segments: vec![ident("posts"), ident("Comment")],
            span: Span::new(0, 13),
        };
        assert_eq!(path.dotted(), "posts.Comment");
        assert!(!path.is_simple());
    }

    #[test]
    fn test_sized_identifier_display() {
        let sized = TypeIdentifier::Sized(TypeSizeSpecification {
            name: ident("bytes"),
            size: Literal {
                value: 12,
                span: Span::default(),
            },
            span: Span::default(),
        });
        assert_eq!(sized.to_string(), "bytes[12]");
        assert_eq!(sized.kind(), SyntaxKind::TypeSizeSpecification);
    }

    #[test]
    fn test_tree_serializes() {
        let schema = Schema {
            body: vec![Item::Comment(CommentBlock {
                text: " hello".into(),
                span: Span::new(0, 8),
            })],
            span: Span::new(0, 8),
        };
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["body"][0]["Comment"]["text"], " hello");
    }
}
