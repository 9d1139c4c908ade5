//! Reference resolution for schema documents that already passed the
//! meta-schema.

use serde_json::{Map, Value};

use super::{
    ConstraintSet, FieldConstraint, Registry, SubSchema, CHILDREN, DEFAULT_VALUE, FIELDS,
    FIELDS_VALIDATOR, IS_REQUIRED, NAME, TRANSFORMER, VALIDATOR, VALUE,
};
use crate::error::{ErrorPayload, FailureCode};
use crate::payload::to_payload;
use crate::validation::Validation;
use crate::validator::{Predicate, Transformer};

pub(super) fn resolve_set(registry: &Registry, document: &Value) -> Validation<ConstraintSet> {
    let empty = Map::new();
    let object = document.as_object().unwrap_or(&empty);

    let fields_validator = optional(object.get(FIELDS_VALIDATOR), |name| {
        resolve_predicate(registry, name)
    })
    .map_failure(|p| ErrorPayload::field(FIELDS_VALIDATOR, p));

    let entries = object
        .get(FIELDS)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let fields = Validation::combine_all(entries.iter().enumerate().map(|(index, entry)| {
        resolve_field(registry, entry)
            .map_failure(|p| ErrorPayload::element(index, entry.clone(), p))
    }))
    .map_failure(|p| ErrorPayload::field(FIELDS, p));

    fields_validator
        .combine2(fields)
        .map(|(fields_validator, fields)| ConstraintSet {
            fields,
            fields_validator,
        })
}

fn resolve_field(registry: &Registry, entry: &Value) -> Validation<FieldConstraint> {
    let get = |key: &str| entry.get(key);

    let validator = get(VALIDATOR)
        .map_or_else(
            || Validation::Failure(to_payload(FailureCode::IsPredicateRef, &Value::Null, vec![])),
            |name| resolve_predicate(registry, name),
        )
        .map_failure(|p| ErrorPayload::field(VALIDATOR, p));
    let transformer = optional(get(TRANSFORMER), |name| resolve_transformer(registry, name))
        .map_failure(|p| ErrorPayload::field(TRANSFORMER, p));
    let value = optional(get(VALUE), |doc| resolve_set(registry, doc))
        .map_failure(|p| ErrorPayload::field(VALUE, p));
    let children = optional(get(CHILDREN), |doc| resolve_set(registry, doc))
        .map_failure(|p| ErrorPayload::field(CHILDREN, p));

    validator
        .combine2(transformer)
        .combine2(value)
        .combine2(children)
        .map(|(((validator, transformer), value), children)| {
            let name = get(NAME).and_then(Value::as_str).unwrap_or_default();
            FieldConstraint {
                name: name.to_string(),
                validator,
                is_required: get(IS_REQUIRED).and_then(Value::as_bool),
                default_value: get(DEFAULT_VALUE).cloned(),
                transformer,
                value: value.map(SubSchema::from),
                children: children.map(SubSchema::from),
            }
        })
}

fn optional<T, F>(value: Option<&Value>, resolve: F) -> Validation<Option<T>>
where
    F: FnOnce(&Value) -> Validation<T>,
{
    match value {
        Some(v) => resolve(v).map(Some),
        None => Validation::Success(None),
    }
}

fn resolve_predicate(registry: &Registry, reference: &Value) -> Validation<Predicate> {
    match reference.as_str().and_then(|name| registry.predicate(name)) {
        Some(predicate) => Validation::Success(predicate.clone()),
        None => Validation::Failure(to_payload(FailureCode::UnknownPredicate, reference, vec![])),
    }
}

fn resolve_transformer(registry: &Registry, reference: &Value) -> Validation<Transformer> {
    match reference.as_str().and_then(|name| registry.transformer(name)) {
        Some(transformer) => Validation::Success(transformer.clone()),
        None => Validation::Failure(to_payload(FailureCode::UnknownTransformer, reference, vec![])),
    }
}
