//! End-to-end tests: schema source in, bytes out, object graph back.

use bintransfer::{
    build_plan, compile_schema, EngineConfig, EngineError, ModelSet, Schema, UnitKind, Value,
};
use bintransfer_tests::SchemaHarness;
use serde_json::json;

const USER_SCHEMA: &str = r#"
    type User {
        user -> id: uint, name: string, photo?: Photo, comments: Vector<uint>
    }
    type Photo {
        photo -> id: uint
        photoEmpty
    }
"#;

#[test]
fn test_user_scenario() {
    let harness = SchemaHarness::from_source(USER_SCHEMA);
    let output = harness.round_trip(json!({
        "_name": "user",
        "id": 100,
        "name": "",
        "comments": [],
    }));
    assert_eq!(
        output,
        json!({
            "_name": "user",
            "_type": "User",
            "_traits": [],
            "id": 100,
            "name": "",
            "comments": [],
        })
    );
    assert!(output.get("photo").is_none());
}

#[test]
fn test_optional_reference_present() {
    let harness = SchemaHarness::from_source(USER_SCHEMA);
    let output = harness.round_trip(json!({
        "_name": "user",
        "id": 1,
        "name": "ann",
        "photo": { "_name": "photoEmpty" },
        "comments": [5],
    }));
    assert_eq!(output["photo"]["_name"], json!("photoEmpty"));
    assert_eq!(output["photo"]["_type"], json!("Photo"));
    assert_eq!(output["comments"], json!([5]));
}

#[test]
fn test_key_order_follows_declaration() {
    let harness = SchemaHarness::from_source(USER_SCHEMA);
    let output = harness.round_trip(json!({
        "comments": [],
        "name": "x",
        "id": 3,
        "_name": "user",
    }));
    let keys: Vec<_> = output.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["_name", "_type", "_traits", "id", "name", "comments"]);
}

#[test]
fn test_vector_layouts() {
    let harness = SchemaHarness::from_source(
        r#"
        namespace posts {
            type Post {
                post -> ids: Vector<uint>, comments: Vector<Comment>
            }
            type Comment {
                comment -> text: string
            }
        }
        "#,
    );

    let bytes = harness.encode(json!({
        "_name": "posts.post",
        "ids": [1, 2],
        "comments": [{ "_name": "posts.comment", "text": "ab" }],
    }));

    let comment_id = harness.id("posts.comment").to_le_bytes();
    let mut expected = harness.id("posts.post").to_le_bytes().to_vec();
    expected.extend([2, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
    expected.extend([1, 0, 0, 0]);
    expected.extend(comment_id);
    expected.extend([2, 0, 0, 0, b'a', b'b', 0, 0]);
    assert_eq!(bytes, expected);

    let output = harness.decode(&bytes);
    assert_eq!(output["comments"][0]["text"], json!("ab"));
    assert_eq!(output["comments"][0]["_type"], json!("posts.Comment"));
}

#[test]
fn test_namespace_local_and_unresolved_references() {
    let harness = SchemaHarness::from_source(
        r#"
        namespace posts {
            type Post { post -> reply: Comment }
            type Comment { comment -> text: string }
        }
        namespace feeds {
            type Feed { feed -> top: Comment }
        }
        "#,
    );
    let reply = &harness.container("posts.post").params[0];
    assert_eq!(reply.container_reference.as_deref(), Some("posts.Comment"));
    let top = &harness.container("feeds.feed").params[0];
    assert_eq!(top.container_reference.as_deref(), Some("Comment"));

    // An unresolved reference has no expected IDs, so the header goes unchecked.
    assert!(harness.schema().possible_ids("Comment").is_empty());
    let output = harness.round_trip(json!({
        "_name": "feeds.feed",
        "top": { "_name": "posts.comment", "text": "hi" },
    }));
    assert_eq!(output["top"]["_name"], json!("posts.comment"));
}

#[test]
fn test_strict_bytes_size_mismatch() {
    let harness = SchemaHarness::from_source("type Key { key -> raw: bytes[12] }");
    let err = harness
        .schema()
        .encode(&Value::from(json!({ "_name": "key", "raw": "0x00010203040506070809" })))
        .unwrap_err();
    match err {
        EngineError::InvalidParamSize {
            param,
            expected,
            actual,
        } => {
            assert_eq!(param, "raw");
            assert_eq!((expected, actual), (12, 10));
        }
        other => panic!("unexpected error {other}"),
    }

    let ok = harness.encode(json!({ "_name": "key", "raw": "0x000102030405060708090a0b" }));
    assert_eq!(ok.len(), 4 + 12);
}

#[test]
fn test_aliases_in_wire_form() {
    let harness = SchemaHarness::from_source(
        r#"
        alias Hash = bytes[4];
        alias Digest = Hash;
        type Blob { blob -> hash: Digest, label: string[3] }
        "#,
    );
    let bytes = harness.encode(json!({ "_name": "blob", "hash": [1, 2, 3, 4], "label": "abc" }));
    assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
    assert_eq!(&bytes[8..12], &[3, 0, 0, 0]);
    assert_eq!(bytes.len(), 4 + 4 + 4 + 3 + 3);

    let output = harness.decode(&bytes);
    assert_eq!(output["hash"], json!([1, 2, 3, 4]));
    assert_eq!(output["label"], json!("abc"));
}

#[test]
fn test_trait_polymorphism() {
    let harness = SchemaHarness::from_source(
        r#"
        trait Media;
        type Photo implements Media { photo -> url: string }
        type Video implements Media { video -> url: string, seconds: double }
        type Note { note -> text: string }
        type Album { album -> cover: Media, items: Vector<Media> }
        "#,
    );
    let output = harness.round_trip(json!({
        "_name": "album",
        "cover": { "_name": "photo", "url": "a.png" },
        "items": [
            { "_name": "video", "url": "b.mp4", "seconds": 2.5 },
            { "_name": "photo", "url": "c.png" },
        ],
    }));
    assert_eq!(output["cover"]["_traits"], json!(["Media"]));
    assert_eq!(output["items"][0]["seconds"], json!(2.5));
    assert_eq!(output["items"][1]["_name"], json!("photo"));

    // A Note is not Media: the cover header check rejects it.
    let bytes = harness.encode(json!({
        "_name": "album",
        "cover": { "_name": "note", "text": "n" },
        "items": [],
    }));
    let err = harness.schema().decode(&bytes).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidHeaderForParam { ref param, found, .. }
            if param == "cover" && found == harness.id("note")
    ));

    // Production skips the check and decodes whatever the header names.
    let production = SchemaHarness::with_config(
        r#"
        trait Media;
        type Photo implements Media { photo -> url: string }
        type Video implements Media { video -> url: string, seconds: double }
        type Note { note -> text: string }
        type Album { album -> cover: Media, items: Vector<Media> }
        "#,
        EngineConfig::production(),
    );
    assert_eq!(production.decode(&bytes)["cover"]["_name"], json!("note"));
}

#[test]
fn test_bare_name_encoding() {
    let harness = SchemaHarness::from_source("void : Void; type Box { box -> inner: Void }");
    assert_eq!(
        harness.schema().encode(&Value::from("void")).unwrap(),
        harness.encode(json!({ "_name": "void" }))
    );
    let output = harness.round_trip(json!({ "_name": "box", "inner": "void" }));
    assert_eq!(output["inner"]["_name"], json!("void"));
}

#[test]
fn test_ids_are_deterministic_and_structural() {
    let a = compile_schema("type User { user -> id: uint, photo?: Photo }").unwrap();
    let b = compile_schema("type User { user -> id: uint, photo?: Photo }").unwrap();
    assert_eq!(a.containers[0].id, b.containers[0].id);

    for changed in [
        "type User { user -> uid: uint, photo?: Photo }",
        "type User { user -> id: int, photo?: Photo }",
        "type User { user -> id: uint, photo: Photo }",
    ] {
        let c = compile_schema(changed).unwrap();
        assert_ne!(a.containers[0].id, c.containers[0].id, "{}", changed);
    }
}

#[test]
fn test_model_json_reloads() {
    let model = compile_schema(USER_SCHEMA).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let reloaded: ModelSet = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, model);

    let direct = Schema::new(&[model]).unwrap();
    let loaded = Schema::new(&[reloaded]).unwrap();
    let input = Value::from(json!({ "_name": "user", "id": 9, "name": "z", "comments": [1] }));
    assert_eq!(direct.encode(&input).unwrap(), loaded.encode(&input).unwrap());
}

#[test]
fn test_merged_schemas() {
    let photos = compile_schema("type Photo { photo -> id: uint }").unwrap();
    let users = compile_schema("type User { user -> avatar: Photo }").unwrap();
    let schema = Schema::new(&[photos, users]).unwrap();
    let bytes = schema
        .encode(&Value::from(json!({ "_name": "user", "avatar": { "_name": "photo", "id": 4 } })))
        .unwrap();
    let output = schema.decode(&bytes).unwrap();
    assert_eq!(output.get("avatar").and_then(|a| a.get("id")), Some(&Value::Int(4)));
}

#[test]
fn test_build_plan_from_source() {
    let model = compile_schema(USER_SCHEMA).unwrap();
    let units = build_plan("app", &model.containers).unwrap();
    let kinds: Vec<_> = units.iter().map(|u| u.kind).collect();
    assert_eq!(
        kinds,
        vec![
            UnitKind::Constructor,
            UnitKind::Constructor,
            UnitKind::Constructor,
            UnitKind::Type,
            UnitKind::Type,
            UnitKind::Vector,
            UnitKind::Index,
        ]
    );
    let user = &units[0];
    assert_eq!(user.context["params"][2]["kind"], json!("reference"));
    assert_eq!(
        user.context["params"][2]["possibleIds"],
        json!([model.containers[1].id, model.containers[2].id])
    );
}
