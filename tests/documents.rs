use std::io::Write;

use conform::input::InputError;
use conform::prelude::*;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn compiles_a_document_with_builtins() {
    init_tracing();
    let registry = Registry::with_builtins();
    let schema = registry
        .compile(&json!({
            "fields": [
                { "name": "user", "validator": "isString", "isRequired": true, "transformer": "trim" },
                { "name": "port", "validator": "isInteger", "defaultValue": 8080 },
                {
                    "name": "tags",
                    "validator": "isArray",
                    "children": { "fields": [{ "name": "id", "validator": "isNonEmptyString", "isRequired": true }] }
                }
            ]
        }))
        .unwrap();

    assert_eq!(schema.fields().len(), 3);
    assert_eq!(
        schema.check(&json!({"user": " root ", "tags": [{"id": "x"}]})).unwrap(),
        json!({"user": "root", "port": 8080, "tags": [{"id": "x"}]})
    );

    let err = schema.check(&json!({"user": "a", "tags": [{"id": ""}]})).unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Object Invalid: for field 'tags': Array contained invalid element(s): '1': for field 'id': Was Empty String"]
    );
}

#[test]
fn meta_schema_failures_are_reported_before_resolution() {
    let err = Registry::with_builtins()
        .compile(&json!({ "fields": [{ "name": "a", "validator": "nope", "isRequired": true, "defaultValue": 1 }] }))
        .unwrap_err();
    let payload = err.payload().unwrap();
    let whole = payload
        .at(&[PathSegment::field("fields"), PathSegment::Index(0)])
        .and_then(ErrorPayload::as_grouped)
        .and_then(|g| g.fields_failure_message.as_deref())
        .and_then(ErrorPayload::as_leaf)
        .unwrap();
    assert_eq!(whole.code, FailureCode::ExclusiveKeys);
}

#[test]
fn every_unknown_reference_is_reported() {
    let err = Registry::with_builtins()
        .compile(&json!({
            "fieldsValidator": "noSuchCheck",
            "fields": [
                { "name": "a", "validator": "isString" },
                { "name": "b", "validator": "isWidget", "transformer": "shout" },
                { "name": "c", "validator": "any", "value": { "fields": [{ "name": "d", "validator": "isGadget" }] } }
            ]
        }))
        .unwrap_err();

    let payload = err.payload().unwrap();
    let code_at = |path: &[PathSegment]| payload.at(path).and_then(ErrorPayload::as_leaf).map(|l| l.code.clone());
    let f = PathSegment::field;

    assert_eq!(code_at(&[f("fieldsValidator")]), Some(FailureCode::UnknownPredicate));
    assert_eq!(
        code_at(&[f("fields"), PathSegment::Index(1), f("validator")]),
        Some(FailureCode::UnknownPredicate)
    );
    assert_eq!(
        code_at(&[f("fields"), PathSegment::Index(1), f("transformer")]),
        Some(FailureCode::UnknownTransformer)
    );
    assert_eq!(
        code_at(&[f("fields"), PathSegment::Index(2), f("value"), f("fields"), PathSegment::Index(0), f("validator")]),
        Some(FailureCode::UnknownPredicate)
    );
    assert!(err.to_string().contains("No predicate registered as 'isWidget'"));
    assert!(err.to_string().contains("No transformer registered as 'shout'"));
}

#[test]
fn user_predicates_and_transformers() {
    let even = conform::predicate("isEven", |value| match value.as_i64() {
        Some(n) if n % 2 == 0 => Validation::Success(value.clone()),
        _ => Validation::Failure(ErrorPayload::custom("Wasn't Even", value)),
    });
    let double = conform::transformer("double", |value| match value.as_i64() {
        Some(n) => json!(n * 2),
        None => value,
    });
    let registry = Registry::new().with_predicate(even).with_transformer(double);

    let schema = registry
        .compile(&json!({ "fields": [{ "name": "n", "validator": "isEven", "transformer": "double" }] }))
        .unwrap();
    assert_eq!(schema.check(&json!({"n": 4})).unwrap(), json!({"n": 8}));
    assert_eq!(
        schema.check(&json!({"n": 3})).unwrap_err().messages,
        vec!["Object Invalid: for field 'n': Wasn't Even"]
    );
}

#[test]
fn aliases() {
    let mut registry = Registry::new();
    registry.register_predicate_as("text", conform::is_string());
    let schema = registry
        .compile(&json!({ "fields": [{ "name": "a", "validator": "text" }] }))
        .unwrap();
    assert!(schema.check(&json!({"a": 1})).is_err());
    assert!(registry.predicate("isString").is_none());
}

#[test]
fn loads_from_text_bytes_and_files() {
    let registry = Registry::with_builtins();
    let text = r#"{ "fields": [{ "name": "a", "validator": "isNumber", "isRequired": true }] }"#;

    assert_eq!(registry.load(text).unwrap().fields().len(), 1);
    assert_eq!(registry.load(text.as_bytes()).unwrap().fields().len(), 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.json");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, "{}", text).unwrap();

    let schema = registry.load(&path).unwrap();
    assert!(schema.check(&json!({"a": 1})).is_ok());
    let schema = registry.load(path.as_path()).unwrap();
    assert!(schema.check(&json!({"a": "1"})).is_err());
}

#[test]
fn load_errors() {
    let registry = Registry::with_builtins();
    assert!(matches!(
        registry.load("{ fields"),
        Err(SchemaError::Input(InputError::Json(_)))
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        registry.load(&missing),
        Err(SchemaError::Input(InputError::Io(_)))
    ));
}

#[test]
fn compiled_schema_describes_back_to_its_document() {
    let doc = json!({
        "fieldsValidator": "isPlainObject",
        "fields": [
            { "name": "a", "validator": "isString", "transformer": "toUpperCase", "isRequired": true },
            { "name": "b", "validator": "isPlainObject", "value": { "fields": [] } }
        ]
    });
    let schema = Registry::with_builtins().compile(&doc).unwrap();
    assert_eq!(schema.describe(), doc);
    assert!(schema.checked().is_ok());
}

#[test]
fn compiled_schemas_are_shareable_across_threads() {
    let schema = std::sync::Arc::new(
        Registry::with_builtins()
            .compile(&json!({ "fields": [{ "name": "a", "validator": "isInteger", "isRequired": true }] }))
            .unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || schema.validate(&json!({ "a": i })).is_success())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
