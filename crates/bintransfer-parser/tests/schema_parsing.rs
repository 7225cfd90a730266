//! Parser tests over complete schema sources.

use bintransfer_ast::*;
use bintransfer_lexer::lex;
use bintransfer_parser::parse_schema;

fn parse(source: &str) -> Schema {
    let tokens = lex(source).expect("lexing should succeed");
    parse_schema(&tokens).expect("parse should succeed")
}

fn declaration(item: &Item) -> &TypeDeclaration {
    match item {
        Item::Declaration(d) => d,
        other => panic!("expected declaration, got {:?}", other.kind()),
    }
}

fn properties(body: &[BodyEntry]) -> Vec<&TypeProperty> {
    body.iter()
        .filter_map(|e| match e {
            BodyEntry::Property(p) => Some(p),
            BodyEntry::Comment(_) => None,
        })
        .collect()
}

fn type_name(ret: &ReturnType) -> String {
    match ret {
        ReturnType::Type(t) => t.to_string(),
        ReturnType::Vector(v) => format!("Vector<{}>", v.item),
    }
}

#[test]
fn test_empty_source() {
    let schema = parse("");
    assert!(schema.body.is_empty());
}

#[test]
fn test_named_declaration_with_short_body() {
    let schema = parse("user : User -> id: uint, name: string, photo?: Photo, comments: Vector<uint>;");
    let decl = declaration(&schema.body[0]);
    assert_eq!(decl.ctor.dotted(), "user");
    assert_eq!(decl.name.dotted(), "User");

    let props = properties(&decl.body);
    let summary: Vec<_> = props
        .iter()
        .map(|p| (p.key.name.as_str(), p.optional, type_name(&p.return_type)))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("id", false, "uint".to_string()),
            ("name", false, "string".to_string()),
            ("photo", true, "Photo".to_string()),
            ("comments", false, "Vector<uint>".to_string()),
        ]
    );
}

#[test]
fn test_positional_declaration_matches_named_form() {
    let named = parse("account : Account -> id: int, name: string;");
    let positional = parse("Account account -> id: int, name: string;");
    let a = declaration(&named.body[0]);
    let b = declaration(&positional.body[0]);
    assert_eq!(a.ctor.dotted(), b.ctor.dotted());
    assert_eq!(a.name.dotted(), b.name.dotted());
    assert_eq!(properties(&a.body).len(), properties(&b.body).len());
}

#[test]
fn test_declaration_without_body() {
    let schema = parse("Void void;\nEmpty empty");
    assert_eq!(schema.body.len(), 2);
    let void = declaration(&schema.body[0]);
    assert_eq!(void.ctor.dotted(), "void");
    assert_eq!(void.name.dotted(), "Void");
    assert!(void.body.is_empty());
    assert_eq!(declaration(&schema.body[1]).ctor.dotted(), "empty");
}

#[test]
fn test_brace_body_last_semicolon_optional() {
    let schema = parse("post : Post { id: uint; title: string }");
    let decl = declaration(&schema.body[0]);
    assert_eq!(properties(&decl.body).len(), 2);
}

#[test]
fn test_trailing_comment_after_last_property() {
    let schema = parse("post : Post {\n  id: uint; // key\n  title: string // shown as-is\n}");
    let decl = declaration(&schema.body[0]);
    assert_eq!(properties(&decl.body).len(), 2);
    assert_eq!(decl.body.len(), 4);
    assert!(matches!(&decl.body[3], BodyEntry::Comment(c) if c.text == " shown as-is"));

    let schema = parse("post : Post { id: uint /* key */; title: string }");
    let decl = declaration(&schema.body[0]);
    assert!(matches!(&decl.body[1], BodyEntry::Comment(c) if c.text == " key "));
    assert_eq!(properties(&decl.body).len(), 2);
}

#[test]
fn test_keywords_as_property_names() {
    let schema = parse("msg : Msg { type: uint; alias: string; }");
    let decl = declaration(&schema.body[0]);
    let names: Vec<_> = properties(&decl.body)
        .iter()
        .map(|p| p.key.name.clone())
        .collect();
    assert_eq!(names, vec!["type", "alias"]);
}

#[test]
fn test_type_group_members() {
    let source = r#"
        type Post implements Request, Named {
            // full post
            post { id: uint; title: string; }
            postShort -> id: uint;
            postEmpty
        }
    "#;
    let schema = parse(source);
    let group = match &schema.body[0] {
        Item::TypeGroup(g) => g,
        other => panic!("expected type group, got {:?}", other.kind()),
    };
    assert_eq!(group.name.name, "Post");
    let traits: Vec<_> = group.traits.iter().map(|t| t.dotted()).collect();
    assert_eq!(traits, vec!["Request", "Named"]);

    let members: Vec<_> = group
        .body
        .iter()
        .filter_map(|m| match m {
            GroupMember::Container(c) => Some((c.name.dotted(), properties(&c.body).len())),
            GroupMember::Comment(_) => None,
        })
        .collect();
    assert_eq!(
        members,
        vec![
            ("post".to_string(), 2),
            ("postShort".to_string(), 1),
            ("postEmpty".to_string(), 0),
        ]
    );
    assert!(matches!(&group.body[0], GroupMember::Comment(c) if c.text == " full post"));
}

#[test]
fn test_namespace_nesting() {
    let source = r#"
        namespace user {
            namespace filter {
                userFilter : UserFilter -> id: uint;
            }
            user : User -> id: uint;
        }
    "#;
    let schema = parse(source);
    let outer = match &schema.body[0] {
        Item::Namespace(ns) => ns,
        other => panic!("expected namespace, got {:?}", other.kind()),
    };
    assert_eq!(outer.name.name, "user");
    assert_eq!(outer.body.len(), 2);
    assert!(matches!(&outer.body[0], Item::Namespace(inner) if inner.name.name == "filter"));
}

#[test]
fn test_alias_and_sized_types() {
    let schema = parse("alias Hash = bytes[32];\nalias Blob = bytes\nuser : User -> hash: Hash, name: string[8];");
    let alias = match &schema.body[0] {
        Item::Alias(a) => a,
        other => panic!("expected alias, got {:?}", other.kind()),
    };
    assert_eq!(alias.name.name, "Hash");
    assert_eq!(alias.target.to_string(), "bytes[32]");
    assert!(matches!(&schema.body[1], Item::Alias(a) if a.target.to_string() == "bytes"));

    let decl = declaration(&schema.body[2]);
    let props = properties(&decl.body);
    match &props[1].return_type {
        ReturnType::Type(TypeIdentifier::Sized(spec)) => {
            assert_eq!(spec.name.name, "string");
            assert_eq!(spec.size.value, 8);
        }
        other => panic!("expected sized type, got {:?}", other),
    }
}

#[test]
fn test_trait_forms() {
    let schema = parse("trait Request;\ntrait Named { name: string; }");
    assert!(matches!(&schema.body[0], Item::Trait(t) if t.name.name == "Request" && t.body.is_empty()));
    assert!(matches!(&schema.body[1], Item::Trait(t) if t.body.len() == 1));
}

#[test]
fn test_vector_of_dotted_path() {
    let schema = parse("feed : Feed -> posts: Vector<posts.Post>;");
    let decl = declaration(&schema.body[0]);
    assert_eq!(type_name(&properties(&decl.body)[0].return_type), "Vector<posts.Post>");
}

#[test]
fn test_comments_are_kept_in_order() {
    let source = "/* A */\n// B\nvoid : Void;";
    let schema = parse(source);
    assert!(matches!(&schema.body[0], Item::Comment(c) if c.text == " A "));
    assert!(matches!(&schema.body[1], Item::Comment(c) if c.text == " B"));
    assert_eq!(schema.body[2].kind(), SyntaxKind::TypeDeclaration);
}

#[test]
fn test_dash_comment_block() {
    let schema = parse("--- User account record ---\nuser : User;");
    assert!(matches!(&schema.body[0], Item::Comment(c) if c.text == "User account record"));
}

#[test]
fn test_property_comments_in_short_body() {
    let schema = parse("user : User -> // the id\n id: uint, /* the name */ name: string;");
    let decl = declaration(&schema.body[0]);
    assert_eq!(decl.body.len(), 4);
    assert!(matches!(&decl.body[0], BodyEntry::Comment(c) if c.text == " the id"));
    assert!(matches!(&decl.body[2], BodyEntry::Comment(c) if c.text == " the name "));
}

#[test]
fn test_spans_cover_declaration() {
    let source = "user : User -> id: uint;";
    let schema = parse(source);
    let decl = declaration(&schema.body[0]);
    assert_eq!(decl.span.snippet(source), Some(source));
    assert_eq!(decl.ctor.span, Span::new(0, 4));
}
