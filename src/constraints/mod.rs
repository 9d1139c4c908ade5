//! Constraint schemas.
//!
//! A [`ConstraintSet`] is an ordered list of [`FieldConstraint`]s plus an
//! optional whole-object predicate. Sets are immutable once built and are
//! shared freely between threads.
//!
//! Sets can be built in code with the builder methods, or authored as JSON
//! documents and compiled through a [`Registry`]. Either way the shape is
//! checked by the same meta-schema ([`meta::meta_schema`]).

mod compile;
pub mod defaults;
pub mod meta;
mod registry;
pub mod transform;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{SchemaError, ValidationError};
use crate::messages::{default_resolver, CONSTRAINTS_INVALID};
use crate::validator::{Predicate, Transformer};

pub use registry::Registry;

pub const FIELDS: &str = "fields";
pub const FIELDS_VALIDATOR: &str = "fieldsValidator";
pub const NAME: &str = "name";
pub const VALIDATOR: &str = "validator";
pub const TRANSFORMER: &str = "transformer";
pub const IS_REQUIRED: &str = "isRequired";
pub const DEFAULT_VALUE: &str = "defaultValue";
pub const VALUE: &str = "value";
pub const CHILDREN: &str = "children";

/// Every key a field constraint may carry.
pub const FIELD_CONSTRAINT_KEYS: [&str; 7] = [
    NAME,
    VALIDATOR,
    TRANSFORMER,
    IS_REQUIRED,
    DEFAULT_VALUE,
    VALUE,
    CHILDREN,
];

/// A nested schema held by a field's `value` or `children`.
#[derive(Debug, Clone)]
pub enum SubSchema {
    Owned(Arc<ConstraintSet>),
    /// A reference to a set with static lifetime, resolved on use. Lets a
    /// schema refer to itself.
    Lazy(fn() -> &'static ConstraintSet),
}

impl SubSchema {
    pub fn get(&self) -> &ConstraintSet {
        match self {
            SubSchema::Owned(set) => set,
            SubSchema::Lazy(resolve) => resolve(),
        }
    }

    /// Data rendering. Lazy references render as `{}`.
    pub fn describe(&self) -> Value {
        match self {
            SubSchema::Owned(set) => set.describe(),
            SubSchema::Lazy(_) => Value::Object(Map::new()),
        }
    }
}

impl From<ConstraintSet> for SubSchema {
    fn from(set: ConstraintSet) -> Self {
        SubSchema::Owned(Arc::new(set))
    }
}

impl From<Arc<ConstraintSet>> for SubSchema {
    fn from(set: Arc<ConstraintSet>) -> Self {
        SubSchema::Owned(set)
    }
}

/// One schema entry governing a single key.
#[derive(Debug, Clone)]
pub struct FieldConstraint {
    name: String,
    validator: Predicate,
    is_required: Option<bool>,
    default_value: Option<Value>,
    transformer: Option<Transformer>,
    value: Option<SubSchema>,
    children: Option<SubSchema>,
}

impl FieldConstraint {
    pub fn new(name: impl Into<String>, validator: Predicate) -> Self {
        Self {
            name: name.into(),
            validator,
            is_required: None,
            default_value: None,
            transformer: None,
            value: None,
            children: None,
        }
    }

    /// Shorthand for `is_required(true)`.
    pub fn required(self) -> Self {
        self.is_required(true)
    }

    pub fn is_required(mut self, required: bool) -> Self {
        self.is_required = Some(required);
        self
    }

    /// Value inserted when the key is absent. A defaulted field is not
    /// passed to its validator.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn transformer(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Schema for the field's value as a single nested object.
    pub fn value(mut self, schema: impl Into<SubSchema>) -> Self {
        self.value = Some(schema.into());
        self
    }

    /// Schema for each element when the field's value is an array, or for
    /// the value itself otherwise.
    pub fn children(mut self, schema: impl Into<SubSchema>) -> Self {
        self.children = Some(schema.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validator(&self) -> &Predicate {
        &self.validator
    }

    pub fn required_flag(&self) -> Option<bool> {
        self.is_required
    }

    pub fn default_value_ref(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn transformer_ref(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    pub fn value_schema(&self) -> Option<&SubSchema> {
        self.value.as_ref()
    }

    pub fn children_schema(&self) -> Option<&SubSchema> {
        self.children.as_ref()
    }

    pub fn describe(&self) -> Value {
        let mut out = Map::new();
        out.insert(NAME.into(), Value::String(self.name.clone()));
        out.insert(VALIDATOR.into(), Value::String(self.validator.name().into()));
        if let Some(required) = self.is_required {
            out.insert(IS_REQUIRED.into(), Value::Bool(required));
        }
        if let Some(default) = &self.default_value {
            out.insert(DEFAULT_VALUE.into(), default.clone());
        }
        if let Some(transformer) = &self.transformer {
            out.insert(TRANSFORMER.into(), Value::String(transformer.name().into()));
        }
        if let Some(value) = &self.value {
            out.insert(VALUE.into(), value.describe());
        }
        if let Some(children) = &self.children {
            out.insert(CHILDREN.into(), children.describe());
        }
        Value::Object(out)
    }
}

/// A schema: ordered field constraints plus an optional whole-object
/// predicate.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use serde_json::json;
///
/// let schema = ConstraintSet::new()
///     .field(FieldConstraint::new("host", conform::is_string()).required())
///     .field(FieldConstraint::new("port", conform::is_integer()).default_value(8080))
///     .checked()
///     .unwrap();
///
/// let out = schema.validate(&json!({"host": "localhost"})).into_result().unwrap();
/// assert_eq!(out, json!({"host": "localhost", "port": 8080}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    fields: Vec<FieldConstraint>,
    fields_validator: Option<Predicate>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldConstraint) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fields_validator(mut self, predicate: Predicate) -> Self {
        self.fields_validator = Some(predicate);
        self
    }

    pub fn fields(&self) -> &[FieldConstraint] {
        &self.fields
    }

    pub fn fields_validator(&self) -> Option<&Predicate> {
        self.fields_validator.as_ref()
    }

    /// No fields and no whole-object predicate: accepts any shape.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.fields_validator.is_none()
    }

    pub fn has_required_fields(&self) -> bool {
        self.fields.iter().any(|f| f.is_required == Some(true))
    }

    pub fn required_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required == Some(true))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Data rendering of the set, with predicates and transformers by name.
    pub fn describe(&self) -> Value {
        let mut out = Map::new();
        if let Some(predicate) = &self.fields_validator {
            out.insert(FIELDS_VALIDATOR.into(), Value::String(predicate.name().into()));
        }
        out.insert(
            FIELDS.into(),
            Value::Array(self.fields.iter().map(FieldConstraint::describe).collect()),
        );
        Value::Object(out)
    }

    /// Check the set against the meta-schema.
    pub fn checked(self) -> Result<Self, SchemaError> {
        let description = self.describe();
        meta::validate_constraints(meta::meta_schema(), &description)
            .into_result()
            .map_err(|payload| {
                tracing::debug!("constraint set failed the meta-schema");
                SchemaError::Invalid(ValidationError::new(
                    Some(CONSTRAINTS_INVALID),
                    payload,
                    default_resolver(),
                ))
            })?;
        Ok(self)
    }
}
