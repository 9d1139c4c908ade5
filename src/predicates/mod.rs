//! Predicate library.
//!
//! Every constructor returns a named [`Predicate`]; parameterless ones are
//! listed by [`builtins`] and registered under their names by
//! [`Registry::with_builtins`](crate::constraints::Registry::with_builtins).

mod keys;
mod length;
mod logic;
mod numeric;
mod types;
mod values;

pub use keys::{
    exclusive_keys, required_keys, unique_values_of, validate_exclusive_keys,
    validate_required_keys, validate_whitelisted_keys, whitelisted_keys,
};
pub use length::{
    is_length_between, is_length_greater_than, is_length_less_than, is_non_empty_array,
    is_non_empty_string, is_not_empty,
};
pub use logic::{all_of, any_of};
pub use numeric::{is_negative, is_non_negative, is_non_positive, is_positive};
pub use types::{
    any, is_array, is_boolean, is_integer, is_not_null, is_null, is_number, is_plain_object,
    is_predicate_ref, is_string,
};
pub use values::{is_not_blacklisted_value, is_whitelisted_value};

use crate::validator::Predicate;

/// All parameterless predicates.
pub fn builtins() -> Vec<Predicate> {
    vec![
        any(),
        is_array(),
        is_plain_object(),
        is_boolean(),
        is_string(),
        is_number(),
        is_integer(),
        is_null(),
        is_not_null(),
        is_predicate_ref(),
        is_not_empty(),
        is_non_empty_string(),
        is_non_empty_array(),
        is_positive(),
        is_negative(),
        is_non_negative(),
        is_non_positive(),
    ]
}
