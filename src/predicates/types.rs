use serde_json::Value;

use crate::error::FailureCode;
use crate::validation::Validation;
use crate::validator::Predicate;

/// Accepts any value.
pub fn any() -> Predicate {
    Predicate::new("any", |value| Validation::Success(value.clone()))
}

pub fn is_array() -> Predicate {
    Predicate::from_test("isArray", FailureCode::IsArray, Value::is_array)
}

/// A JSON object (`{...}`).
pub fn is_plain_object() -> Predicate {
    Predicate::from_test("isPlainObject", FailureCode::IsPlainObject, Value::is_object)
}

pub fn is_boolean() -> Predicate {
    Predicate::from_test("isBoolean", FailureCode::IsBoolean, Value::is_boolean)
}

pub fn is_string() -> Predicate {
    Predicate::from_test("isString", FailureCode::IsString, Value::is_string)
}

pub fn is_number() -> Predicate {
    Predicate::from_test("isNumber", FailureCode::IsNumber, Value::is_number)
}

/// A number with no fractional part (`3` and `3.0` both pass).
pub fn is_integer() -> Predicate {
    Predicate::from_test("isInteger", FailureCode::IsInteger, |value| {
        match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => true,
            Value::Number(n) => n.as_f64().map_or(false, |f| f.is_finite() && f.fract() == 0.0),
            _ => false,
        }
    })
}

pub fn is_null() -> Predicate {
    Predicate::from_test("isNull", FailureCode::IsNull, Value::is_null)
}

pub fn is_not_null() -> Predicate {
    Predicate::from_test("isNotNull", FailureCode::IsNotNull, |value| !value.is_null())
}

/// A reference to a registered predicate or transformer: a non-empty string.
pub fn is_predicate_ref() -> Predicate {
    Predicate::from_test("isPredicateRef", FailureCode::IsPredicateRef, |value| {
        value.as_str().map_or(false, |s| !s.trim().is_empty())
    })
}
