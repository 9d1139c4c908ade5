//! Message tables for rendering failure leaves.
//!
//! A [`MessageResolver`] maps the stable key from [`FailureCode::key()`]
//! to a template; `{param}` placeholders are filled from
//! [`FailureInfo::params()`].
//!
//! # Example
//!
//! ```
//! use conform::prelude::*;
//! use conform::messages::{english, render_leaf};
//! use serde_json::json;
//!
//! let resolver = english().with("is_string", "Se esperaba texto, se recibió {received}");
//! let payload = conform::is_string().validate(&json!(5));
//! let leaf = payload.failure().and_then(ErrorPayload::as_leaf).unwrap();
//! assert_eq!(render_leaf(leaf, &resolver), "Se esperaba texto, se recibió 5");
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::FailureInfo;

/// Label of failures produced by the object engine.
pub const OBJECT_INVALID: &str = "Object Invalid";
/// Label of failures produced while checking a constraint schema.
pub const CONSTRAINTS_INVALID: &str = "Constraints Object Invalid";
/// Lead-in of a rendered array element failure.
pub const ARRAY_INVALID: &str = "Array contained invalid element(s)";

/// Trait for resolving failure messages by code key.
///
/// Implementations return the template string for the given key, or
/// `None` to fall back to the generic message.
pub trait MessageResolver {
    fn resolve(&self, key: &str) -> Option<String>;
}

/// Simple [`MessageResolver`] backed by a `HashMap<String, String>`.
pub struct MapResolver {
    map: HashMap<String, String>,
}

impl MapResolver {
    pub fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Override or add one template.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.map.insert(key.into(), template.into());
        self
    }
}

impl MessageResolver for MapResolver {
    fn resolve(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }
}

/// A [`MessageResolver`] that delegates to a closure.
///
/// # Example
/// ```
/// use conform::messages::FnResolver;
///
/// let resolver = FnResolver::new(|key| match key {
///     "is_string" => Some("Text expected".into()),
///     _ => None,
/// });
/// ```
pub struct FnResolver<F: Fn(&str) -> Option<String>> {
    f: F,
}

impl<F: Fn(&str) -> Option<String>> FnResolver<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(&str) -> Option<String>> MessageResolver for FnResolver<F> {
    fn resolve(&self, key: &str) -> Option<String> {
        (self.f)(key)
    }
}

/// Replace `{param_name}` placeholders with values from `params`.
fn apply_params(template: &str, params: &[(&str, String)]) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        result = result.replace(&format!("{{{}}}", key), value);
    }
    result
}

/// Render one leaf.
///
/// An explicit message on the leaf wins; otherwise the resolver's template
/// for the code key is used.
pub fn render_leaf(info: &FailureInfo, resolver: &dyn MessageResolver) -> String {
    if let Some(message) = &info.message {
        return message.clone();
    }
    match resolver.resolve(info.code.key()) {
        Some(template) => apply_params(&template, &info.params()),
        None => format!("Validation error: {}", info.code.key()),
    }
}

/// The English table, built once.
pub fn default_resolver() -> &'static MapResolver {
    static ENGLISH: OnceLock<MapResolver> = OnceLock::new();
    ENGLISH.get_or_init(english)
}

/// Create a [`MapResolver`] with the default English messages.
///
/// Useful as a base for overriding specific keys with [`MapResolver::with`].
pub fn english() -> MapResolver {
    let entries: &[(&str, &str)] = &[
        // Types
        ("is_array", "Wasn't Array"),
        ("is_plain_object", "Wasn't Plain Object"),
        ("is_boolean", "Wasn't Boolean"),
        ("is_string", "Wasn't String"),
        ("is_number", "Wasn't Number"),
        ("is_integer", "Wasn't Integer"),
        ("is_null", "Wasn't Null"),
        ("is_not_null", "Was Null"),
        ("is_predicate_ref", "Wasn't a predicate reference"),
        // Empty
        ("is_not_empty", "Was Empty"),
        ("is_non_empty_string", "Was Empty String"),
        ("is_non_empty_array", "Was Empty Array"),
        // Numeric
        ("is_positive", "Wasn't Positive"),
        ("is_negative", "Wasn't Negative"),
        ("is_non_negative", "Wasn't Non-Negative"),
        ("is_non_positive", "Wasn't Non-Positive"),
        // Length
        ("length_between", "Length wasn't between '{min}' and '{max}'"),
        ("length_greater_than", "Length wasn't greater than '{length}'"),
        ("length_less_than", "Length wasn't less than '{length}'"),
        // Object
        ("exclusive_keys", "Object had more than one exclusive key: {keys}"),
        ("required_keys", "Object was missing required key(s): {keys}"),
        ("whitelisted_keys", "Object included key(s) not on whitelist: {keys}"),
        ("duplicate_values", "Contained duplicate value(s) for '{key}': {values}"),
        // Other
        ("whitelisted_value", "Value wasn't on the whitelist: {values}"),
        ("not_blacklisted_value", "Value was on the blacklist: {values}"),
        ("unknown_predicate", "No predicate registered as '{name}'"),
        ("unknown_transformer", "No transformer registered as '{name}'"),
        ("parse_error", "Failed to parse input"),
    ];
    MapResolver::new(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}
