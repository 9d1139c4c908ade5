use serde_json::Value;

use crate::error::{ErrorPayload, FailureCode};
use crate::payload::to_payload;
use crate::validation::Validation;
use crate::validator::Validator;

/// Validates every element of an array with one element validator.
/// Created via [`conform::array_elements()`](crate::array_elements).
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use conform::messages::english;
/// use serde_json::json;
///
/// let schema = conform::array_elements(conform::is_positive());
/// let err = schema.check_with(&json!([-1, 2, -3]), &english()).unwrap_err();
/// assert_eq!(
///     err.messages,
///     vec!["Array contained invalid element(s): '1': Wasn't Positive, '3': Wasn't Positive"],
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ArrayElements<V> {
    element: V,
}

impl<V: Validator> ArrayElements<V> {
    pub fn new(element: V) -> Self {
        Self { element }
    }
}

impl<V: Validator> Validator for ArrayElements<V> {
    fn validate(&self, value: &Value) -> Validation<Value> {
        validate_array_elements(&self.element, value)
    }
}

/// Validate each element independently, in ascending index order, without
/// stopping at the first failure.
///
/// The success value is the array of the element validator's outputs.
/// Failures are recorded per element (0-based) with the element value.
pub fn validate_array_elements<V: Validator + ?Sized>(element: &V, value: &Value) -> Validation<Value> {
    let Some(items) = value.as_array() else {
        return Validation::Failure(to_payload(FailureCode::IsArray, value, vec![]));
    };

    Validation::combine_all(items.iter().enumerate().map(|(index, item)| {
        tracing::trace!(index, "validating element");
        element
            .validate(item)
            .map_failure(|p| ErrorPayload::element(index, item.clone(), p))
    }))
    .map(Value::Array)
}
