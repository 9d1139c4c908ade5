use serde_json::Value;

use crate::error::FailureCode;
use crate::validator::Predicate;

/// Length of a string (in chars) or an array.
fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Inclusive on both ends.
pub fn is_length_between(min: usize, max: usize) -> Predicate {
    Predicate::from_test(
        format!("isLengthBetween({}, {})", min, max),
        FailureCode::LengthBetween { min, max },
        move |value| length_of(value).map_or(false, |len| len >= min && len <= max),
    )
}

pub fn is_length_greater_than(length: usize) -> Predicate {
    Predicate::from_test(
        format!("isLengthGreaterThan({})", length),
        FailureCode::LengthGreaterThan { length },
        move |value| length_of(value).map_or(false, |len| len > length),
    )
}

pub fn is_length_less_than(length: usize) -> Predicate {
    Predicate::from_test(
        format!("isLengthLessThan({})", length),
        FailureCode::LengthLessThan { length },
        move |value| length_of(value).map_or(false, |len| len < length),
    )
}

/// A non-empty object, array or string. Other values pass.
pub fn is_not_empty() -> Predicate {
    Predicate::from_test("isNotEmpty", FailureCode::IsNotEmpty, |value| match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    })
}

pub fn is_non_empty_string() -> Predicate {
    Predicate::from_test("isNonEmptyString", FailureCode::IsNonEmptyString, |value| {
        value.as_str().map_or(false, |s| !s.is_empty())
    })
}

pub fn is_non_empty_array() -> Predicate {
    Predicate::from_test("isNonEmptyArray", FailureCode::IsNonEmptyArray, |value| {
        value.as_array().map_or(false, |items| !items.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Validator;
    use serde_json::json;

    #[test]
    fn length_between_is_inclusive() {
        let p = is_length_between(2, 3);
        assert!(p.is_valid(&json!("ab")));
        assert!(p.is_valid(&json!([1, 2, 3])));
        assert!(!p.is_valid(&json!("a")));
        assert!(!p.is_valid(&json!(12)));
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(is_length_less_than(3).is_valid(&json!("жж")));
    }
}
