use serde_json::Value;

use crate::error::FailureCode;
use crate::validator::Predicate;

fn number_where(
    name: &'static str,
    code: FailureCode,
    test: fn(f64) -> bool,
) -> Predicate {
    Predicate::from_test(name, code, move |value: &Value| {
        value.as_f64().map_or(false, test)
    })
}

pub fn is_positive() -> Predicate {
    number_where("isPositive", FailureCode::IsPositive, |n| n > 0.0)
}

pub fn is_negative() -> Predicate {
    number_where("isNegative", FailureCode::IsNegative, |n| n < 0.0)
}

pub fn is_non_negative() -> Predicate {
    number_where("isNonNegative", FailureCode::IsNonNegative, |n| n >= 0.0)
}

pub fn is_non_positive() -> Predicate {
    number_where("isNonPositive", FailureCode::IsNonPositive, |n| n <= 0.0)
}
