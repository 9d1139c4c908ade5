use serde_json::Value;

use crate::error::FailureCode;
use crate::payload::to_payload;
use crate::validation::Validation;
use crate::validator::Predicate;

/// Value must equal one of `whitelist`.
pub fn is_whitelisted_value(whitelist: Vec<Value>) -> Predicate {
    let name = format!("isWhitelistedValue({})", whitelist.len());
    Predicate::new(name, move |value| {
        if whitelist.contains(value) {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(to_payload(
                FailureCode::WhitelistedValue,
                value,
                vec![Value::Array(whitelist.clone())],
            ))
        }
    })
}

/// Value must not equal any of `blacklist`.
pub fn is_not_blacklisted_value(blacklist: Vec<Value>) -> Predicate {
    let name = format!("isNotBlacklistedValue({})", blacklist.len());
    Predicate::new(name, move |value| {
        if blacklist.contains(value) {
            Validation::Failure(to_payload(
                FailureCode::NotBlacklistedValue,
                value,
                vec![Value::Array(blacklist.clone())],
            ))
        } else {
            Validation::Success(value.clone())
        }
    })
}
