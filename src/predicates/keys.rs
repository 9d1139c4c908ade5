//! Object-shape checkers: exclusive, required and whitelisted keys.
//!
//! Used by the object engine (required keys) and by the meta-schema. Each
//! failure is a single leaf whose context is `[keys checked, offending keys]`.

use serde_json::{Map, Value};

use crate::error::FailureCode;
use crate::payload::{key_list, to_payload};
use crate::validation::Validation;
use crate::validator::Predicate;

fn with_object<F>(value: &Value, check: F) -> Validation<Value>
where
    F: FnOnce(&Map<String, Value>) -> Option<(FailureCode, Vec<Value>)>,
{
    let Some(object) = value.as_object() else {
        return Validation::Failure(to_payload(FailureCode::IsPlainObject, value, vec![]));
    };
    match check(object) {
        Some((code, context)) => Validation::Failure(to_payload(code, value, context)),
        None => Validation::Success(value.clone()),
    }
}

/// At most one of `keys` may be present.
pub fn validate_exclusive_keys<S: AsRef<str>>(keys: &[S], value: &Value) -> Validation<Value> {
    with_object(value, |object| {
        let present: Vec<&str> = keys
            .iter()
            .map(AsRef::as_ref)
            .filter(|k| object.contains_key(*k))
            .collect();
        (present.len() > 1)
            .then(|| (FailureCode::ExclusiveKeys, vec![key_list(keys), key_list(&present)]))
    })
}

/// Every one of `keys` must be present.
pub fn validate_required_keys<S: AsRef<str>>(keys: &[S], value: &Value) -> Validation<Value> {
    with_object(value, |object| {
        let missing: Vec<&str> = keys
            .iter()
            .map(AsRef::as_ref)
            .filter(|k| !object.contains_key(*k))
            .collect();
        (!missing.is_empty())
            .then(|| (FailureCode::RequiredKeys, vec![key_list(keys), key_list(&missing)]))
    })
}

/// No key outside `keys` may be present.
pub fn validate_whitelisted_keys<S: AsRef<str>>(keys: &[S], value: &Value) -> Validation<Value> {
    with_object(value, |object| {
        let extra: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|k| !keys.iter().any(|allowed| allowed.as_ref() == *k))
            .collect();
        (!extra.is_empty())
            .then(|| (FailureCode::WhitelistedKeys, vec![key_list(keys), key_list(&extra)]))
    })
}

fn owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

pub fn exclusive_keys(keys: &[&str]) -> Predicate {
    let keys = owned(keys);
    Predicate::new(format!("exclusiveKeys({})", keys.join(", ")), move |value| {
        validate_exclusive_keys(&keys, value)
    })
}

pub fn required_keys(keys: &[&str]) -> Predicate {
    let keys = owned(keys);
    Predicate::new(format!("requiredKeys({})", keys.join(", ")), move |value| {
        validate_required_keys(&keys, value)
    })
}

pub fn whitelisted_keys(keys: &[&str]) -> Predicate {
    let keys = owned(keys);
    Predicate::new(format!("whitelistedKeys({})", keys.join(", ")), move |value| {
        validate_whitelisted_keys(&keys, value)
    })
}

/// In an array of objects, `key` must not hold the same value twice.
/// Elements that are not objects, or lack `key`, are ignored.
pub fn unique_values_of(key: &str) -> Predicate {
    let key = key.to_string();
    Predicate::new(format!("uniqueValuesOf({})", key), move |value| {
        let Some(items) = value.as_array() else {
            return Validation::Failure(to_payload(FailureCode::IsArray, value, vec![]));
        };
        let mut seen: Vec<&Value> = Vec::new();
        let mut duplicates: Vec<Value> = Vec::new();
        for v in items.iter().filter_map(|item| item.get(&key)) {
            if seen.contains(&v) {
                if !duplicates.contains(v) {
                    duplicates.push(v.clone());
                }
            } else {
                seen.push(v);
            }
        }
        if duplicates.is_empty() {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(to_payload(
                FailureCode::DuplicateValues { key: key.clone() },
                value,
                vec![Value::Array(duplicates)],
            ))
        }
    })
}
