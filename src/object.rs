//! The object validation engine.
//!
//! Runs one [`ConstraintSet`] against one value:
//!
//! 1. the value must be a plain object;
//! 2. an empty object fails outright when the set has required fields;
//! 3. every missing required key is reported in one failure;
//! 4. defaults are inserted for absent keys;
//! 5. the whole-object predicate and every present, non-defaulted field are
//!    checked independently and their failures accumulated;
//! 6. on success, transformers run over the assembled object.
//!
//! Steps 1 to 3 stop the pipeline. Their failures, and those of the
//! whole-object predicate, are recorded as `fieldsFailureMessage`; field
//! failures are recorded under their field name. A whole-object failure the
//! predicate already addressed to a field is recorded under that field.

use serde_json::{Map, Value};

use crate::collections::validate_array_elements;
use crate::constraints::defaults::apply_defaults;
use crate::constraints::transform::apply_transforms;
use crate::constraints::{ConstraintSet, FieldConstraint, SubSchema};
use crate::error::{ErrorPayload, FailureCode};
use crate::messages::OBJECT_INVALID;
use crate::payload::to_payload;
use crate::predicates::validate_required_keys;
use crate::validation::Validation;
use crate::validator::Validator;

/// Validate `value` against `constraints`.
///
/// On success the result is the input object with defaults inserted,
/// nested sub-schema outputs substituted and transformers applied. Keys
/// with no constraint pass through unchanged.
pub fn validate_object_with_constraints(constraints: &ConstraintSet, value: &Value) -> Validation<Value> {
    let Some(object) = value.as_object() else {
        tracing::debug!(received = %crate::error::value_type_name(value), "not a plain object");
        return Validation::Failure(ErrorPayload::whole_object(to_payload(
            FailureCode::IsPlainObject,
            value,
            vec![],
        )));
    };

    if object.is_empty() && constraints.has_required_fields() {
        tracing::debug!("empty object against a schema with required fields");
        return Validation::Failure(ErrorPayload::whole_object(to_payload(
            FailureCode::IsNotEmpty,
            value,
            vec![],
        )));
    }

    let required = constraints.required_names();
    if !required.is_empty() {
        if let Validation::Failure(payload) = validate_required_keys(&required, value) {
            tracing::debug!("missing required keys");
            return Validation::Failure(ErrorPayload::whole_object(payload));
        }
    }

    apply_defaults(constraints.fields(), object)
        .and_then(|defaulted| check_fields(constraints, value, object, defaulted))
        .and_then(|checked| apply_transforms(constraints.fields(), checked))
        .map(Value::Object)
}

fn check_fields(
    constraints: &ConstraintSet,
    input: &Value,
    original: &Map<String, Value>,
    mut defaulted: Map<String, Value>,
) -> Validation<Map<String, Value>> {
    let whole = match constraints.fields_validator() {
        Some(predicate) => predicate
            .validate(input)
            .map(|_| ())
            .map_failure(attach_whole_object),
        None => Validation::Success(()),
    };

    let fields = Validation::combine_all(
        constraints
            .fields()
            .iter()
            .filter_map(|field| {
                original
                    .get(field.name())
                    .map(|field_value| (field, field_value))
            })
            .map(|(field, field_value)| {
                tracing::trace!(field = field.name(), "validating field");
                check_field(field, field_value)
                    .map(|output| (field.name(), output))
                    .map_failure(|p| ErrorPayload::field(field.name(), p))
            }),
    );

    whole.combine2(fields).map(|((), outputs)| {
        for (name, output) in outputs {
            defaulted.insert(name.to_string(), output);
        }
        defaulted
    })
}

/// Place a whole-object predicate failure. Parts the predicate already
/// addressed to a field stay under that field; the rest become
/// `fieldsFailureMessage`.
fn attach_whole_object(payload: ErrorPayload) -> ErrorPayload {
    match payload {
        ErrorPayload::Grouped(_) => payload,
        ErrorPayload::And(items) if items.iter().any(|p| p.as_grouped().is_some()) => items
            .into_iter()
            .map(attach_whole_object)
            .reduce(ErrorPayload::merge)
            .unwrap_or(ErrorPayload::And(vec![])),
        other => ErrorPayload::whole_object(other),
    }
}

/// The field's own validator, then its nested schema if any. The stored
/// value is the input value or the nested schema's output.
fn check_field(field: &FieldConstraint, value: &Value) -> Validation<Value> {
    field.validator().validate(value).and_then(|_| {
        match (field.children_schema(), field.value_schema()) {
            (Some(children), _) => check_children(children, value),
            (None, Some(nested)) => check_nested(nested, value),
            (None, None) => Validation::Success(value.clone()),
        }
    })
}

fn check_children(children: &SubSchema, value: &Value) -> Validation<Value> {
    let schema = children.get();
    if schema.is_empty() {
        return Validation::Success(value.clone());
    }
    if value.is_array() {
        validate_array_elements(schema, value)
    } else {
        validate_object_with_constraints(schema, value)
    }
}

fn check_nested(nested: &SubSchema, value: &Value) -> Validation<Value> {
    let schema = nested.get();
    if schema.is_empty() {
        Validation::Success(value.clone())
    } else {
        validate_object_with_constraints(schema, value)
    }
}

impl Validator for ConstraintSet {
    fn validate(&self, value: &Value) -> Validation<Value> {
        validate_object_with_constraints(self, value)
    }

    fn label(&self) -> Option<&str> {
        Some(OBJECT_INVALID)
    }
}
