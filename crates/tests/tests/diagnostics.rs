//! Error reporting and documentation across the pipeline.

use bintransfer::{compile_schema, format_error, Error, ErrorKind, SchemaParser};
use bintransfer_tests::init_tracing;

fn failure(source: &str) -> (Error, String) {
    init_tracing();
    let err = SchemaParser::new().parse(source).unwrap_err();
    let rendered = format_error(source, &err);
    (err, rendered)
}

#[test]
fn test_lex_error_points_at_character() {
    let (err, rendered) = failure("type User {\n  user -> id: uint #\n}");
    assert!(matches!(err, Error::Lex(_)));
    assert!(rendered.contains("--> 2:20"), "{}", rendered);
}

#[test]
fn test_unterminated_comment() {
    let (err, _) = failure("/* never closed\ntype A { a }");
    match err {
        Error::Lex(e) => assert_eq!(e.kind, bintransfer::lexer::LexErrorKind::UnterminatedComment),
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn test_unexpected_end_of_input() {
    let (err, rendered) = failure("namespace app {\n  type A { a }\n");
    match err {
        Error::Parse(e) => {
            assert_eq!(e.kind, bintransfer::parser::ParseErrorKind::UnexpectedEof)
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(rendered.starts_with("error: unexpected end of input"));
}

#[test]
fn test_duplicate_container_reports_both_sites() {
    let (err, rendered) = failure("type A {\n  a\n}\na : B");
    assert!(matches!(err, Error::Compile(ref e) if e.kind == ErrorKind::DuplicateContainerName));
    assert!(rendered.contains("--> 4:1"), "{}", rendered);
    assert!(rendered.contains("note: first declared here"));
    assert!(rendered.contains("--> 2:3"), "{}", rendered);
}

#[test]
fn test_alias_errors() {
    let (err, _) = failure("alias A = B;\nalias B = A;\nx : X -> v: A");
    assert!(matches!(err, Error::Compile(ref e) if e.kind == ErrorKind::AliasCycle));

    let (err, _) = failure("alias A = Photo;");
    assert!(matches!(err, Error::Compile(ref e) if e.kind == ErrorKind::InvalidAliasTarget));
}

#[test]
fn test_docs_reach_the_model() {
    let model = compile_schema(
        r#"
        /**
         * A registered account.
         * Never deleted.
         */
        type User {
            user {
                // Primary key
                id: uint;
                /* Display name */
                name: string
            }
        }
        "#,
    )
    .unwrap();

    let user = &model.containers[0];
    assert_eq!(user.doc, vec!["A registered account.", "Never deleted."]);
    assert_eq!(user.params[0].doc, vec![" Primary key"]);
    assert_eq!(user.params[1].doc, vec![" Display name "]);
}
