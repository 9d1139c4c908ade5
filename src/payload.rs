//! Builds uniform leaf payloads from a predicate's raw failure signal.

use serde_json::Value;

use crate::error::{ErrorPayload, FailureCode, FailureInfo};
use crate::validation::Validation;

/// Turn a failure code, the offending value and the predicate's extra
/// arguments into a leaf [`ErrorPayload`].
pub fn to_payload(code: FailureCode, value: &Value, context: Vec<Value>) -> ErrorPayload {
    ErrorPayload::Leaf(FailureInfo {
        code,
        value: value.clone(),
        context,
        message: None,
    })
}

/// Encode a list of keys as a context argument.
pub fn key_list<S: AsRef<str>>(keys: &[S]) -> Value {
    Value::Array(
        keys.iter()
            .map(|k| Value::String(k.as_ref().to_string()))
            .collect(),
    )
}

/// Fluent builder for a single leaf payload.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use serde_json::json;
///
/// let payload = PayloadBuilder::new(FailureCode::RequiredKeys)
///     .value(&json!({"a": 1}))
///     .keys(&["a", "b"])
///     .keys(&["b"])
///     .build();
/// let leaf = payload.as_leaf().unwrap();
/// assert_eq!(leaf.context.len(), 2);
/// ```
pub struct PayloadBuilder {
    code: FailureCode,
    value: Value,
    context: Vec<Value>,
    message: Option<String>,
}

impl PayloadBuilder {
    pub fn new(code: FailureCode) -> Self {
        Self {
            code,
            value: Value::Null,
            context: vec![],
            message: None,
        }
    }

    /// Attach the offending value.
    pub fn value(mut self, value: &Value) -> Self {
        self.value = value.clone();
        self
    }

    /// Append one context argument.
    pub fn arg(mut self, arg: impl Into<Value>) -> Self {
        self.context.push(arg.into());
        self
    }

    /// Append a key list as one context argument.
    pub fn keys<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        self.context.push(key_list(keys));
        self
    }

    /// Set an explicit message.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    pub fn build(self) -> ErrorPayload {
        ErrorPayload::Leaf(FailureInfo {
            code: self.code,
            value: self.value,
            context: self.context,
            message: self.message,
        })
    }

    /// Build and wrap as a failed validation.
    pub fn fail<T>(self) -> Validation<T> {
        Validation::Failure(self.build())
    }
}
