mod common;

use common::{spy, stub};
use conform::prelude::*;
use serde_json::json;

fn fail_on(indices: &'static [(usize, &'static str)]) -> (Predicate, common::Calls) {
    stub("element", move |call, value| {
        match indices.iter().find(|(i, _)| *i == call) {
            Some((_, message)) => Validation::Failure(ErrorPayload::custom(*message, value)),
            None => Validation::Success(value.clone()),
        }
    })
}

#[test]
fn empty_array_is_vacuously_valid() {
    let (element, calls) = spy("element");
    let schema = conform::array_elements(element);
    assert_eq!(schema.validate(&json!([])), Validation::Success(json!([])));
    assert!(calls.not_called());
}

#[test]
fn valid_elements_are_each_checked_once() {
    let (element, calls) = spy("element");
    let schema = conform::array_elements(element);
    assert_eq!(schema.validate(&json!([1, 2, 3])), Validation::Success(json!([1, 2, 3])));
    assert_eq!(calls.all(), vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn invalid_first_element() {
    let (element, calls) = fail_on(&[(0, "message1")]);
    let err = conform::array_elements(element).check(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.messages, vec!["Array contained invalid element(s): '1': message1"]);
    assert_eq!(calls.count(), 3);
}

#[test]
fn invalid_middle_element() {
    let (element, calls) = fail_on(&[(1, "message1")]);
    let err = conform::array_elements(element).check(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.messages, vec!["Array contained invalid element(s): '2': message1"]);
    assert!(calls.called_with(&json!(1)));
    assert!(calls.called_with(&json!(2)));
    assert!(calls.called_with(&json!(3)));
}

#[test]
fn invalid_last_element() {
    let (element, calls) = fail_on(&[(2, "message1")]);
    let err = conform::array_elements(element).check(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.messages, vec!["Array contained invalid element(s): '3': message1"]);
    assert_eq!(calls.count(), 3);
}

#[test]
fn multiple_invalid_elements_are_joined_in_order() {
    let (element, calls) = fail_on(&[(0, "message1"), (2, "message2")]);
    let err = conform::array_elements(element).check(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(
        err.messages,
        vec!["Array contained invalid element(s): '1': message1, '3': message2"]
    );
    assert_eq!(calls.count(), 3);

    let children = err.payload.as_grouped().and_then(|g| g.children.as_ref()).unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!((children[0].index, &children[0].value), (0, &json!(1)));
    assert_eq!((children[1].index, &children[1].value), (2, &json!(3)));
}

#[test]
fn non_array_input_fails() {
    let (element, calls) = spy("element");
    let result = conform::validate_array_elements(&element, &json!({"a": 1}));
    let leaf = result.failure().and_then(ErrorPayload::as_leaf).unwrap();
    assert_eq!(leaf.code, FailureCode::IsArray);
    assert!(calls.not_called());
}

#[test]
fn element_outputs_form_the_result() {
    let schema = conform::array_elements(
        conform::constraints().field(conform::field("n", conform::is_integer()).default_value(0)),
    );
    assert_eq!(
        schema.validate(&json!([{}, {"n": 2}])),
        Validation::Success(json!([{"n": 0}, {"n": 2}]))
    );
}

#[test]
fn object_values_reports_failing_keys() {
    let schema = conform::object_values(conform::is_string());
    let payload = schema
        .validate(&json!({"a": "x", "b": 1, "c": true}))
        .into_result()
        .unwrap_err();
    match &payload {
        ErrorPayload::FieldMap(map) => {
            assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), vec!["b", "c"])
        }
        other => panic!("expected a field map, got {other:?}"),
    }
    assert_eq!(
        flatten_messages(&payload, &conform::messages::english()),
        vec!["for field 'b': Wasn't String", "for field 'c': Wasn't String"]
    );
}
