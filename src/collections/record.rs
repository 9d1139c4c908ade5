use serde_json::{Map, Value};

use crate::error::{ErrorPayload, FailureCode, FieldFailures};
use crate::payload::to_payload;
use crate::validation::Validation;
use crate::validator::Validator;

/// Validates every value of an object with one validator, whatever the
/// keys. Created via [`conform::object_values()`](crate::object_values).
///
/// Failures are reported as a field map keyed by the failing keys.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use serde_json::json;
///
/// let schema = conform::object_values(conform::is_integer());
/// assert!(schema.validate(&json!({"a": 1, "b": 2})).is_success());
/// assert!(schema.validate(&json!({"a": 1, "b": "2"})).is_failure());
/// ```
#[derive(Debug, Clone)]
pub struct ObjectValues<V> {
    values: V,
}

impl<V: Validator> ObjectValues<V> {
    pub fn new(values: V) -> Self {
        Self { values }
    }
}

impl<V: Validator> Validator for ObjectValues<V> {
    fn validate(&self, value: &Value) -> Validation<Value> {
        validate_object_values(&self.values, value)
    }
}

pub fn validate_object_values<V: Validator + ?Sized>(validator: &V, value: &Value) -> Validation<Value> {
    let Some(object) = value.as_object() else {
        return Validation::Failure(to_payload(FailureCode::IsPlainObject, value, vec![]));
    };

    let mut output = Map::new();
    let mut failures = FieldFailures::new();
    for (key, item) in object {
        match validator.validate(item) {
            Validation::Success(v) => {
                output.insert(key.clone(), v);
            }
            Validation::Failure(p) => {
                failures.insert(key.clone(), p);
            }
        }
    }

    if failures.is_empty() {
        Validation::Success(Value::Object(output))
    } else {
        Validation::Failure(ErrorPayload::FieldMap(failures))
    }
}
