use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{ErrorPayload, FailureCode, ValidationError};
use crate::input::JsonInput;
use crate::messages::{default_resolver, MessageResolver};
use crate::payload::to_payload;
use crate::validation::Validation;

/// Core validation trait.
///
/// Every checker in `conform` implements this trait: predicates, constraint
/// sets (the object engine) and the array/record element validators.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use serde_json::json;
///
/// let schema = conform::constraints()
///     .field(conform::field("name", conform::is_string()).required());
/// assert!(schema.validate(&json!({"name": "Alex"})).is_success());
/// ```
pub trait Validator {
    /// Validate a value, accumulating every failure.
    fn validate(&self, value: &Value) -> Validation<Value>;

    /// Prefix for flattened messages (`Object Invalid`, ...).
    fn label(&self) -> Option<&str> {
        None
    }

    /// Validate and render failures with the default English messages.
    fn check(&self, value: &Value) -> Result<Value, ValidationError> {
        self.check_with(value, default_resolver())
    }

    /// Validate and render failures with the given message table.
    fn check_with(
        &self,
        value: &Value,
        resolver: &dyn MessageResolver,
    ) -> Result<Value, ValidationError> {
        self.validate(value)
            .into_result()
            .map_err(|payload| ValidationError::new(self.label(), payload, resolver))
    }

    /// Parse any supported input (JSON string, bytes, file path, `Value`)
    /// and validate it.
    fn check_input<I: JsonInput + ?Sized>(&self, input: &I) -> Result<Value, ValidationError>
    where
        Self: Sized,
    {
        let value = input.to_json_value().map_err(|e| {
            let payload = to_payload(FailureCode::ParseError, &Value::Null, vec![])
                .with_message(&e.to_string());
            ValidationError::new(None, payload, default_resolver())
        })?;
        self.check(&value)
    }

    fn is_valid(&self, value: &Value) -> bool {
        self.validate(value).is_success()
    }
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate(&self, value: &Value) -> Validation<Value> {
        (**self).validate(value)
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: &Value) -> Validation<Value> {
        (**self).validate(value)
    }

    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

type CheckFn = dyn Fn(&Value) -> Validation<Value> + Send + Sync;

/// A named predicate: `value -> Success(value) | Failure(payload)`.
///
/// Cheap to clone; schemas hold predicates by value. The name is how the
/// predicate appears in a described schema and in a [`Registry`](crate::constraints::Registry).
#[derive(Clone)]
pub struct Predicate {
    name: Cow<'static, str>,
    check: Arc<CheckFn>,
}

impl Predicate {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, check: F) -> Self
    where
        F: Fn(&Value) -> Validation<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// Predicate from a boolean test; failure is a leaf with `code`.
    pub fn from_test<F>(name: impl Into<Cow<'static, str>>, code: FailureCode, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(name, move |value| {
            if test(value) {
                Validation::Success(value.clone())
            } else {
                Validation::Failure(to_payload(code.clone(), value, vec![]))
            }
        })
    }

    /// Wrap any validator as a predicate.
    pub fn from_validator<V>(name: impl Into<Cow<'static, str>>, validator: V) -> Self
    where
        V: Validator + Send + Sync + 'static,
    {
        Self::new(name, move |value| validator.validate(value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `next` on this predicate's success value. Failures of `self`
    /// short-circuit.
    pub fn and_then(self, next: Predicate) -> Predicate {
        let name = format!("{}.{}", self.name, next.name);
        Predicate::new(name, move |value| {
            self.validate(value).and_then(|v| next.validate(&v))
        })
    }

    /// Replace the message of every failure this predicate produces.
    pub fn message(self, msg: impl Into<String>) -> Predicate {
        let msg = msg.into();
        let name = self.name.clone();
        Predicate::new(name, move |value| {
            self.validate(value).map_failure(|p: ErrorPayload| p.with_message(&msg))
        })
    }
}

impl Validator for Predicate {
    fn validate(&self, value: &Value) -> Validation<Value> {
        (self.check)(value)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

type TransformFn = dyn Fn(Value) -> Value + Send + Sync;

/// A named value transformer, applied to a field after it validated.
#[derive(Clone)]
pub struct Transformer {
    name: Cow<'static, str>,
    apply: Arc<TransformFn>,
}

impl Transformer {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, apply: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: Value) -> Value {
        (self.apply)(value)
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transformer").field(&self.name).finish()
    }
}
