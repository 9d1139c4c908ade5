mod common;

use common::{stub_returns_success, stub_transformer};
use conform::prelude::*;
use conform::{apply_defaults, apply_transforms};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

fn fields_with_default_b() -> Vec<FieldConstraint> {
    vec![
        conform::field("a", conform::any()).required(),
        conform::field("b", conform::any()).default_value("x"),
    ]
}

#[test]
fn without_defaults_the_value_is_unchanged() {
    let fields = vec![
        conform::field("a", conform::any()).required(),
        conform::field("b", conform::any()),
    ];
    let input = object(json!({"a": 1}));
    assert_eq!(apply_defaults(&fields, &input), Validation::Success(input.clone()));
}

#[test]
fn defaults_fill_absent_keys() {
    let input = object(json!({"a": 1}));
    assert_eq!(
        apply_defaults(&fields_with_default_b(), &input),
        Validation::Success(object(json!({"a": 1, "b": "x"})))
    );
}

#[test]
fn defaults_never_overwrite_present_keys() {
    let input = object(json!({"a": 1, "b": 2}));
    assert_eq!(apply_defaults(&fields_with_default_b(), &input), Validation::Success(input.clone()));

    let input = object(json!({"a": 1, "b": null}));
    assert_eq!(apply_defaults(&fields_with_default_b(), &input), Validation::Success(input.clone()));
}

#[test]
fn transforms_apply_to_present_keys_only() {
    let (t, calls) = stub_transformer("t", json!("changed"));
    let fields = vec![
        conform::field("a", conform::any()).transformer(t.clone()),
        conform::field("b", conform::any()).transformer(t),
    ];
    let out = apply_transforms(&fields, object(json!({"a": 1, "c": 3})));
    assert_eq!(out, Validation::Success(object(json!({"a": "changed", "c": 3}))));
    assert_eq!(calls.all(), vec![json!(1)]);
}

#[test]
fn transformer_sees_the_validated_input_value() {
    let (v, v_calls) = stub_returns_success("v", json!("ignored"));
    let plus_one = conform::transformer("plusOne", |value| match value.as_i64() {
        Some(n) => json!(n + 1),
        None => value,
    });
    let schema = conform::constraints().field(conform::field("a", v).transformer(plus_one));

    assert_eq!(schema.validate(&json!({"a": 1})), Validation::Success(json!({"a": 2})));
    assert_eq!(v_calls.all(), vec![json!(1)]);
}

#[test]
fn defaulted_fields_skip_validators_but_are_transformed() {
    let (v4, v4_calls) = stub_returns_success("v4", json!(0));
    let (t, t_calls) = stub_transformer("t", json!(40));
    let schema = conform::constraints().field(conform::field("d", v4).default_value(4).transformer(t));

    assert_eq!(schema.validate(&json!({"x": 1})), Validation::Success(json!({"x": 1, "d": 40})));
    assert!(v4_calls.not_called());
    assert_eq!(t_calls.all(), vec![json!(4)]);
}

#[test]
fn transformers_do_not_run_on_failure() {
    let (t, calls) = stub_transformer("t", json!(0));
    let schema = conform::constraints()
        .field(conform::field("a", conform::is_number()).transformer(t))
        .field(conform::field("b", conform::is_string()));

    assert!(schema.validate(&json!({"a": 1, "b": 2})).is_failure());
    assert!(calls.not_called());
}
