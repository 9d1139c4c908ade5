//! # conform — declarative, self-checking constraint schemas for JSON values
//!
//! A schema ([`ConstraintSet`](constraints::ConstraintSet)) lists named fields,
//! each with a predicate and optional required/default/transformer settings
//! and nested sub-schemas. Validation never stops at the first problem: every
//! failing field, element and whole-object check is collected into one
//! structured [`ErrorPayload`](error::ErrorPayload) tree.
//!
//! Schemas are themselves checked against a meta-schema before use, either
//! built in code and [`checked`](constraints::ConstraintSet::checked), or
//! authored as JSON and compiled through a [`Registry`](constraints::Registry).
//!
//! ## Quick Start
//!
//! ```rust
//! use conform::prelude::*;
//! use serde_json::json;
//!
//! let schema = conform::constraints()
//!     .field(conform::field("name", conform::is_non_empty_string()).required())
//!     .field(conform::field("retries", conform::is_integer()).default_value(3))
//!     .field(
//!         conform::field("tags", conform::is_array())
//!             .children(conform::constraints().field(conform::field("id", conform::is_string()).required())),
//!     )
//!     .checked()
//!     .unwrap();
//!
//! let out = schema.check(&json!({"name": "job", "tags": [{"id": "a"}]})).unwrap();
//! assert_eq!(out["retries"], 3);
//!
//! let err = schema.check(&json!({"retries": 1})).unwrap_err();
//! assert_eq!(err.messages, vec!["Object Invalid: Object was missing required key(s): ['name']"]);
//! ```

pub mod collections;
pub mod constraints;
pub mod error;
pub mod format;
pub mod input;
pub mod messages;
pub mod object;
pub mod payload;
pub mod predicates;
pub mod render;
pub mod validation;
pub mod validator;

#[doc(hidden)]
pub use serde_json;

pub use collections::validate_array_elements;
pub use constraints::defaults::apply_defaults;
pub use constraints::meta::validate_constraints;
pub use constraints::transform::apply_transforms;
pub use object::validate_object_with_constraints;
pub use predicates::{
    all_of, any, any_of, exclusive_keys, is_array, is_boolean, is_integer, is_length_between,
    is_length_greater_than, is_length_less_than, is_negative, is_non_empty_array,
    is_non_empty_string, is_non_negative, is_non_positive, is_not_blacklisted_value,
    is_not_empty, is_not_null, is_null, is_number, is_plain_object, is_positive,
    is_predicate_ref, is_string, is_whitelisted_value, required_keys, unique_values_of,
    whitelisted_keys,
};

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create an empty constraint set.
pub fn constraints() -> constraints::ConstraintSet {
    constraints::ConstraintSet::new()
}

/// Create a field constraint.
pub fn field(name: impl Into<String>, validator: validator::Predicate) -> constraints::FieldConstraint {
    constraints::FieldConstraint::new(name, validator)
}

/// Validate every element of an array.
pub fn array_elements<V: validator::Validator>(element: V) -> collections::ArrayElements<V> {
    collections::ArrayElements::new(element)
}

/// Validate every value of an object, whatever its keys.
pub fn object_values<V: validator::Validator>(values: V) -> collections::ObjectValues<V> {
    collections::ObjectValues::new(values)
}

/// Create a named predicate from a closure.
pub fn predicate<F>(name: &'static str, check: F) -> validator::Predicate
where
    F: Fn(&serde_json::Value) -> validation::Validation<serde_json::Value> + Send + Sync + 'static,
{
    validator::Predicate::new(name, check)
}

/// Create a named transformer from a closure.
pub fn transformer<F>(name: &'static str, apply: F) -> validator::Transformer
where
    F: Fn(serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
{
    validator::Transformer::new(name, apply)
}

/// Prelude: import everything commonly needed.
pub mod prelude {
    pub use crate::collections::{ArrayElements, ObjectValues};
    pub use crate::constraints::{ConstraintSet, FieldConstraint, Registry, SubSchema};
    pub use crate::error::{
        ElementFailure, ErrorPayload, FailureCode, FailureInfo, GroupedFailure, PathSegment,
        SchemaError, ValidationError,
    };
    pub use crate::format::{flatten_messages, issues, prettify, Issue};
    pub use crate::input::JsonInput;
    pub use crate::messages::MessageResolver;
    pub use crate::payload::{to_payload, PayloadBuilder};
    pub use crate::validation::Validation;
    pub use crate::validator::{Predicate, Transformer, Validator};
}
