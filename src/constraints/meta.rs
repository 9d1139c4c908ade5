//! The meta-schema: a constraint set describing constraint sets.
//!
//! It is applied to the data form of a schema (a JSON document, or
//! [`ConstraintSet::describe`]) by the ordinary object engine. Predicates and
//! transformers appear in that form as non-empty reference strings.

use std::sync::OnceLock;

use serde_json::Value;

use super::{
    ConstraintSet, FieldConstraint, SubSchema, CHILDREN, DEFAULT_VALUE, FIELDS, FIELDS_VALIDATOR,
    FIELD_CONSTRAINT_KEYS, IS_REQUIRED, NAME, TRANSFORMER, VALIDATOR, VALUE,
};
use crate::error::ErrorPayload;
use crate::object::validate_object_with_constraints;
use crate::predicates::{
    all_of, any, exclusive_keys, is_array, is_boolean, is_non_empty_string, is_plain_object,
    is_predicate_ref, unique_values_of, whitelisted_keys,
};
use crate::validation::Validation;
use crate::validator::{Predicate, Validator};

/// Shape of a whole constraint set: `{ fields?, fieldsValidator? }`.
pub fn meta_schema() -> &'static ConstraintSet {
    static META: OnceLock<ConstraintSet> = OnceLock::new();
    META.get_or_init(|| {
        ConstraintSet::new()
            .with_fields_validator(all_of(vec![
                whitelisted_keys(&[FIELDS_VALIDATOR, FIELDS]),
                unique_field_names(),
            ]))
            .field(FieldConstraint::new(FIELDS_VALIDATOR, is_predicate_ref()))
            .field(
                FieldConstraint::new(FIELDS, is_array())
                    .children(SubSchema::Lazy(field_constraint_schema)),
            )
    })
}

/// Names within `fields` must be distinct. Runs beside the per-entry checks
/// so a duplicate never hides an invalid entry; the failure is addressed to
/// `fields`. A missing or non-array `fields` is left to the field check.
fn unique_field_names() -> Predicate {
    let unique = unique_values_of(NAME);
    Predicate::new("uniqueFieldNames", move |value| {
        match value.get(FIELDS).filter(|fields| fields.is_array()) {
            Some(fields) => unique
                .validate(fields)
                .map(|_| value.clone())
                .map_failure(|p| ErrorPayload::field(FIELDS, p)),
            None => Validation::Success(value.clone()),
        }
    })
}

/// Shape of one entry of `fields`.
pub fn field_constraint_schema() -> &'static ConstraintSet {
    static FIELD: OnceLock<ConstraintSet> = OnceLock::new();
    FIELD.get_or_init(|| {
        ConstraintSet::new()
            .with_fields_validator(all_of(vec![
                whitelisted_keys(&FIELD_CONSTRAINT_KEYS),
                exclusive_keys(&[IS_REQUIRED, DEFAULT_VALUE]),
                exclusive_keys(&[VALUE, CHILDREN]),
            ]))
            .field(FieldConstraint::new(NAME, is_non_empty_string()).required())
            .field(FieldConstraint::new(VALIDATOR, is_predicate_ref()).required())
            .field(FieldConstraint::new(TRANSFORMER, is_predicate_ref()))
            .field(FieldConstraint::new(IS_REQUIRED, is_boolean()))
            .field(FieldConstraint::new(DEFAULT_VALUE, any()))
            .field(
                FieldConstraint::new(VALUE, is_plain_object()).value(SubSchema::Lazy(meta_schema)),
            )
            .field(
                FieldConstraint::new(CHILDREN, is_plain_object())
                    .value(SubSchema::Lazy(meta_schema)),
            )
    })
}

/// Check that `candidate` is a well-formed constraint set under `meta`.
///
/// Returns the candidate unchanged on success.
pub fn validate_constraints(meta: &ConstraintSet, candidate: &Value) -> Validation<Value> {
    validate_object_with_constraints(meta, candidate)
}
