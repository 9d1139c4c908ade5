use std::collections::HashMap;

use serde_json::Value;

use super::{compile, meta, ConstraintSet};
use crate::error::{SchemaError, ValidationError};
use crate::input::JsonInput;
use crate::messages::{default_resolver, CONSTRAINTS_INVALID};
use crate::predicates;
use crate::validator::{Predicate, Transformer};

/// Named predicates and transformers that schema documents refer to.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use serde_json::json;
///
/// let registry = Registry::with_builtins();
/// let schema = registry
///     .compile(&json!({
///         "fields": [
///             { "name": "user", "validator": "isString", "isRequired": true, "transformer": "trim" },
///             { "name": "port", "validator": "isInteger", "defaultValue": 8080 }
///         ]
///     }))
///     .unwrap();
///
/// let out = schema.validate(&json!({"user": "  admin "})).into_result().unwrap();
/// assert_eq!(out, json!({"user": "admin", "port": 8080}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    predicates: HashMap<String, Predicate>,
    transformers: HashMap<String, Transformer>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every parameterless predicate under its own name, plus the `trim`,
    /// `toLowerCase` and `toUpperCase` string transformers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for predicate in predicates::builtins() {
            registry.register_predicate(predicate);
        }
        registry.register_transformer(string_transformer("trim", |s| s.trim().to_string()));
        registry.register_transformer(string_transformer("toLowerCase", str::to_lowercase));
        registry.register_transformer(string_transformer("toUpperCase", str::to_uppercase));
        registry
    }

    /// Register `predicate` under its name, replacing any previous entry.
    pub fn register_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.insert(predicate.name().to_string(), predicate);
        self
    }

    /// Register `predicate` under `alias` instead of its own name.
    pub fn register_predicate_as(&mut self, alias: impl Into<String>, predicate: Predicate) -> &mut Self {
        self.predicates.insert(alias.into(), predicate);
        self
    }

    pub fn register_transformer(&mut self, transformer: Transformer) -> &mut Self {
        self.transformers.insert(transformer.name().to_string(), transformer);
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.register_predicate(predicate);
        self
    }

    pub fn with_transformer(mut self, transformer: Transformer) -> Self {
        self.register_transformer(transformer);
        self
    }

    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn transformer(&self, name: &str) -> Option<&Transformer> {
        self.transformers.get(name)
    }

    /// Check a schema document against the meta-schema, then resolve its
    /// references into a typed [`ConstraintSet`].
    ///
    /// Every unknown reference is reported, at the path the meta-schema
    /// would use for a malformed entry.
    pub fn compile(&self, document: &Value) -> Result<ConstraintSet, SchemaError> {
        let compiled = meta::validate_constraints(meta::meta_schema(), document)
            .and_then(|checked| compile::resolve_set(self, &checked));
        match compiled.into_result() {
            Ok(set) => {
                tracing::debug!(fields = set.fields().len(), "compiled constraint document");
                Ok(set)
            }
            Err(payload) => {
                tracing::debug!("constraint document rejected");
                Err(SchemaError::Invalid(ValidationError::new(
                    Some(CONSTRAINTS_INVALID),
                    payload,
                    default_resolver(),
                )))
            }
        }
    }

    /// Read a schema document (JSON text, bytes, file path or `Value`) and
    /// [`compile`](Registry::compile) it.
    pub fn load<I: JsonInput + ?Sized>(&self, input: &I) -> Result<ConstraintSet, SchemaError> {
        let document = input.to_json_value()?;
        self.compile(&document)
    }
}

fn string_transformer(name: &'static str, f: fn(&str) -> String) -> Transformer {
    Transformer::new(name, move |value| match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    })
}
