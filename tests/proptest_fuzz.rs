//! Property-based tests: defaults are idempotent, failures are never
//! truncated, and nothing panics on arbitrary JSON input.

use proptest::prelude::*;
use serde_json::{Map, Value};
use conform::prelude::*;

// -----------------------------------------------------------------------
// Helpers: arbitrary JSON value generators
// -----------------------------------------------------------------------

fn arb_json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| serde_json::json!(f)),
        any::<i64>().prop_map(|i| serde_json::json!(i)),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(
        3,  // max depth
        64, // max nodes
        8,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
                prop::collection::vec(("[a-z_]{1,8}", inner), 0..6)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        },
    )
}

fn arb_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::vec(("[a-e]", arb_json_value()), 0..6)
        .prop_map(|pairs| pairs.into_iter().collect())
}

fn sample_schema() -> ConstraintSet {
    conform::constraints()
        .field(conform::field("a", conform::is_string()).required())
        .field(conform::field("b", conform::is_integer()).default_value(1))
        .field(
            conform::field("c", conform::is_array())
                .children(conform::constraints().field(conform::field("d", conform::is_number()).required())),
        )
        .field(
            conform::field("e", conform::is_plain_object())
                .value(conform::constraints().field(conform::field("f", conform::is_boolean()))),
        )
}

// -----------------------------------------------------------------------
// 1. Defaults
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn defaults_are_idempotent(input in arb_object()) {
        let fields = vec![
            conform::field("a", conform::any()).default_value("x"),
            conform::field("b", conform::any()).default_value(0),
        ];
        let once = conform::apply_defaults(&fields, &input).into_result().unwrap();
        let twice = conform::apply_defaults(&fields, &once).into_result().unwrap();
        prop_assert_eq!(&once, &twice);
        for (key, value) in &input {
            prop_assert_eq!(once.get(key), Some(value));
        }
    }
}

// -----------------------------------------------------------------------
// 2. No short-circuit
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn every_invalid_field_is_named(n in 1usize..12) {
        let mut schema = conform::constraints();
        let mut input = Map::new();
        for i in 0..n {
            let name = format!("f{i}");
            schema = schema.field(conform::field(name.clone(), conform::is_string()));
            input.insert(name, Value::from(i as u64));
        }
        let payload = schema.validate(&Value::Object(input)).into_result().unwrap_err();
        let fields = payload.as_grouped().and_then(|g| g.fields.as_ref()).unwrap();
        prop_assert_eq!(fields.len(), n);
    }

    #[test]
    fn every_invalid_element_is_named(items in prop::collection::vec(any::<i32>(), 0..20)) {
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, n)| **n <= 0)
            .map(|(i, _)| i)
            .collect();
        let value = Value::from(items);
        let result = conform::array_elements(conform::is_positive()).validate(&value);
        let found: Vec<usize> = result
            .failure()
            .and_then(ErrorPayload::as_grouped)
            .and_then(|g| g.children.as_ref())
            .map(|c| c.iter().map(|e| e.index).collect())
            .unwrap_or_default();
        prop_assert_eq!(found, expected);
    }
}

// -----------------------------------------------------------------------
// 3. Never panics
// -----------------------------------------------------------------------

proptest! {
    #[test]
    fn engine_never_panics(input in arb_json_value()) {
        let schema = sample_schema();
        let _ = schema.check(&input);
    }

    #[test]
    fn meta_schema_never_panics(doc in arb_json_value()) {
        let _ = conform::validate_constraints(conform::constraints::meta::meta_schema(), &doc);
        let _ = Registry::with_builtins().compile(&doc);
    }

    #[test]
    fn valid_values_round_trip(a in ".*", extra in arb_json_value()) {
        let schema = conform::constraints()
            .field(conform::field("a", conform::is_string()).required())
            .field(conform::field("z", conform::any()));
        let input = serde_json::json!({ "a": a, "z": extra });
        prop_assert_eq!(schema.validate(&input), Validation::Success(input.clone()));
    }
}
