use std::fmt;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde_json::Value;

use crate::format;
use crate::messages::MessageResolver;

/// A segment in a failure path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum PathSegment {
    /// Object field name.
    Field(String),
    /// Array index (0-based).
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// Identifies which check failed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum FailureCode {
    IsArray,
    IsPlainObject,
    IsBoolean,
    IsString,
    IsNumber,
    IsInteger,
    IsNull,
    IsNotNull,
    /// Value was not a reference to a registered predicate or transformer.
    IsPredicateRef,
    IsNotEmpty,
    IsNonEmptyString,
    IsNonEmptyArray,
    IsPositive,
    IsNegative,
    IsNonNegative,
    IsNonPositive,
    LengthBetween { min: usize, max: usize },
    LengthGreaterThan { length: usize },
    LengthLessThan { length: usize },
    ExclusiveKeys,
    RequiredKeys,
    WhitelistedKeys,
    DuplicateValues { key: String },
    WhitelistedValue,
    NotBlacklistedValue,
    UnknownPredicate,
    UnknownTransformer,
    ParseError,
    Custom { code: String },
}

impl FailureCode {
    /// Stable string key for this code. Used to look up message templates.
    pub fn key(&self) -> &str {
        match self {
            FailureCode::IsArray => "is_array",
            FailureCode::IsPlainObject => "is_plain_object",
            FailureCode::IsBoolean => "is_boolean",
            FailureCode::IsString => "is_string",
            FailureCode::IsNumber => "is_number",
            FailureCode::IsInteger => "is_integer",
            FailureCode::IsNull => "is_null",
            FailureCode::IsNotNull => "is_not_null",
            FailureCode::IsPredicateRef => "is_predicate_ref",
            FailureCode::IsNotEmpty => "is_not_empty",
            FailureCode::IsNonEmptyString => "is_non_empty_string",
            FailureCode::IsNonEmptyArray => "is_non_empty_array",
            FailureCode::IsPositive => "is_positive",
            FailureCode::IsNegative => "is_negative",
            FailureCode::IsNonNegative => "is_non_negative",
            FailureCode::IsNonPositive => "is_non_positive",
            FailureCode::LengthBetween { .. } => "length_between",
            FailureCode::LengthGreaterThan { .. } => "length_greater_than",
            FailureCode::LengthLessThan { .. } => "length_less_than",
            FailureCode::ExclusiveKeys => "exclusive_keys",
            FailureCode::RequiredKeys => "required_keys",
            FailureCode::WhitelistedKeys => "whitelisted_keys",
            FailureCode::DuplicateValues { .. } => "duplicate_values",
            FailureCode::WhitelistedValue => "whitelisted_value",
            FailureCode::NotBlacklistedValue => "not_blacklisted_value",
            FailureCode::UnknownPredicate => "unknown_predicate",
            FailureCode::UnknownTransformer => "unknown_transformer",
            FailureCode::ParseError => "parse_error",
            FailureCode::Custom { code } => code,
        }
    }
}

/// Leaf failure: what failed, on which value, with which extra context.
///
/// `context` holds predicate arguments, e.g. for the key checkers
/// `[all keys checked, offending keys]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct FailureInfo {
    pub code: FailureCode,
    pub value: Value,
    pub context: Vec<Value>,
    /// Explicit message; wins over the message table when set.
    pub message: Option<String>,
}

impl FailureInfo {
    /// Template parameters for message formatting (`{name}` placeholders).
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("received", format_value_short(&self.value))];
        let list_at = |i: usize| {
            self.context
                .get(i)
                .and_then(Value::as_array)
                .map(|items| format::to_list(items))
                .unwrap_or_else(|| "[]".to_string())
        };
        match &self.code {
            FailureCode::LengthBetween { min, max } => {
                params.push(("min", min.to_string()));
                params.push(("max", max.to_string()));
            }
            FailureCode::LengthGreaterThan { length } | FailureCode::LengthLessThan { length } => {
                params.push(("length", length.to_string()));
            }
            FailureCode::ExclusiveKeys
            | FailureCode::RequiredKeys
            | FailureCode::WhitelistedKeys => {
                params.push(("expected", list_at(0)));
                params.push(("keys", list_at(1)));
            }
            FailureCode::DuplicateValues { key } => {
                params.push(("key", key.clone()));
                params.push(("values", list_at(0)));
            }
            FailureCode::WhitelistedValue | FailureCode::NotBlacklistedValue => {
                params.push(("values", list_at(0)));
            }
            FailureCode::UnknownPredicate | FailureCode::UnknownTransformer => {
                let name = self.value.as_str().map(str::to_string);
                params.push(("name", name.unwrap_or_else(|| self.value.to_string())));
            }
            _ => {}
        }
        params
    }
}

/// Failures keyed by field name, in the order they were recorded.
pub type FieldFailures = IndexMap<String, ErrorPayload>;

/// Structured failure tree.
///
/// Every shape is addressable by [`PathSegment`]s through
/// [`ErrorPayload::at`], so nested failures never need string parsing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ErrorPayload {
    Leaf(FailureInfo),
    /// Field name → failure, for siblings that failed independently.
    FieldMap(FieldFailures),
    Grouped(GroupedFailure),
    /// Conjunctive group: every member failed.
    And(Vec<ErrorPayload>),
    /// Alternative group: no member succeeded.
    Or(Vec<ErrorPayload>),
}

/// Failures of one object: whole-object, per-field and per-element parts.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(rename_all = "camelCase"))]
pub struct GroupedFailure {
    pub fields_failure_message: Option<Box<ErrorPayload>>,
    pub fields: Option<FieldFailures>,
    pub children: Option<Vec<ElementFailure>>,
}

/// A failed array element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ElementFailure {
    /// 0-based position in the array.
    pub index: usize,
    pub value: Value,
    pub payload: ErrorPayload,
}

impl ErrorPayload {
    /// A whole-object failure (`fieldsFailureMessage`).
    pub fn whole_object(payload: ErrorPayload) -> Self {
        ErrorPayload::Grouped(GroupedFailure {
            fields_failure_message: Some(Box::new(payload)),
            ..GroupedFailure::default()
        })
    }

    /// A failure of a single field of an object.
    pub fn field(name: impl Into<String>, payload: ErrorPayload) -> Self {
        let mut fields = FieldFailures::new();
        fields.insert(name.into(), payload);
        ErrorPayload::Grouped(GroupedFailure {
            fields: Some(fields),
            ..GroupedFailure::default()
        })
    }

    /// A failure of a single array element.
    pub fn element(index: usize, value: Value, payload: ErrorPayload) -> Self {
        ErrorPayload::Grouped(GroupedFailure {
            children: Some(vec![ElementFailure {
                index,
                value,
                payload,
            }]),
            ..GroupedFailure::default()
        })
    }

    /// A leaf with a free-form message and no table entry.
    pub fn custom(message: impl Into<String>, value: &Value) -> Self {
        ErrorPayload::Leaf(FailureInfo {
            code: FailureCode::Custom {
                code: "custom".to_string(),
            },
            value: value.clone(),
            context: vec![],
            message: Some(message.into()),
        })
    }

    pub fn as_leaf(&self) -> Option<&FailureInfo> {
        match self {
            ErrorPayload::Leaf(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&GroupedFailure> {
        match self {
            ErrorPayload::Grouped(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_and_or(&self) -> bool {
        matches!(self, ErrorPayload::And(_) | ErrorPayload::Or(_))
    }

    /// Follow `path` down the tree.
    ///
    /// Fields resolve through grouped `fields` and field maps, indices
    /// through grouped `children`.
    pub fn at(&self, path: &[PathSegment]) -> Option<&ErrorPayload> {
        let Some((head, rest)) = path.split_first() else {
            return Some(self);
        };
        let next = match (self, head) {
            (ErrorPayload::Grouped(group), PathSegment::Field(name)) => {
                group.fields.as_ref()?.get(name)?
            }
            (ErrorPayload::FieldMap(map), PathSegment::Field(name)) => map.get(name)?,
            (ErrorPayload::Grouped(group), PathSegment::Index(idx)) => {
                &group
                    .children
                    .as_ref()?
                    .iter()
                    .find(|child| child.index == *idx)?
                    .payload
            }
            _ => return None,
        };
        next.at(rest)
    }

    /// Replace the message of every leaf in the tree.
    pub fn with_message(self, message: &str) -> Self {
        match self {
            ErrorPayload::Leaf(mut info) => {
                info.message = Some(message.to_string());
                ErrorPayload::Leaf(info)
            }
            ErrorPayload::FieldMap(map) => ErrorPayload::FieldMap(
                map.into_iter()
                    .map(|(k, v)| (k, v.with_message(message)))
                    .collect(),
            ),
            ErrorPayload::Grouped(group) => ErrorPayload::Grouped(GroupedFailure {
                fields_failure_message: group
                    .fields_failure_message
                    .map(|p| Box::new(p.with_message(message))),
                fields: group.fields.map(|map| {
                    map.into_iter()
                        .map(|(k, v)| (k, v.with_message(message)))
                        .collect()
                }),
                children: group.children.map(|children| {
                    children
                        .into_iter()
                        .map(|child| ElementFailure {
                            payload: child.payload.with_message(message),
                            ..child
                        })
                        .collect()
                }),
            }),
            ErrorPayload::And(items) => {
                ErrorPayload::And(items.into_iter().map(|p| p.with_message(message)).collect())
            }
            ErrorPayload::Or(items) => {
                ErrorPayload::Or(items.into_iter().map(|p| p.with_message(message)).collect())
            }
        }
    }

    /// Union of two failures.
    ///
    /// Grouped nodes merge part by part (field maps by key, children by
    /// index); anything else is collected into an `And` group.
    pub fn merge(self, other: ErrorPayload) -> Self {
        match (self, other) {
            (ErrorPayload::Grouped(a), ErrorPayload::Grouped(b)) => {
                ErrorPayload::Grouped(a.merge(b))
            }
            (ErrorPayload::FieldMap(a), ErrorPayload::FieldMap(b)) => {
                ErrorPayload::FieldMap(merge_field_maps(a, b))
            }
            (ErrorPayload::And(mut a), ErrorPayload::And(b)) => {
                a.extend(b);
                ErrorPayload::And(a)
            }
            (ErrorPayload::And(mut a), b) => {
                a.push(b);
                ErrorPayload::And(a)
            }
            (a, ErrorPayload::And(b)) => {
                let mut items = vec![a];
                items.extend(b);
                ErrorPayload::And(items)
            }
            (a, b) => ErrorPayload::And(vec![a, b]),
        }
    }
}

impl GroupedFailure {
    fn merge(self, other: GroupedFailure) -> Self {
        let fields_failure_message = match (self.fields_failure_message, other.fields_failure_message)
        {
            (Some(a), Some(b)) => Some(Box::new(a.merge(*b))),
            (a, b) => a.or(b),
        };
        let fields = match (self.fields, other.fields) {
            (Some(a), Some(b)) => Some(merge_field_maps(a, b)),
            (a, b) => a.or(b),
        };
        let children = match (self.children, other.children) {
            (Some(a), Some(b)) => Some(merge_children(a, b)),
            (a, b) => a.or(b),
        };
        GroupedFailure {
            fields_failure_message,
            fields,
            children,
        }
    }
}

fn merge_field_maps(mut a: FieldFailures, b: FieldFailures) -> FieldFailures {
    for (name, payload) in b {
        match a.entry(name) {
            Entry::Occupied(mut entry) => {
                let existing = std::mem::replace(entry.get_mut(), ErrorPayload::And(vec![]));
                *entry.get_mut() = existing.merge(payload);
            }
            Entry::Vacant(entry) => {
                entry.insert(payload);
            }
        }
    }
    a
}

fn merge_children(mut a: Vec<ElementFailure>, b: Vec<ElementFailure>) -> Vec<ElementFailure> {
    for child in b {
        match a.iter_mut().find(|c| c.index == child.index) {
            Some(existing) => {
                let payload = std::mem::replace(&mut existing.payload, ErrorPayload::And(vec![]));
                existing.payload = payload.merge(child.payload);
            }
            None => a.push(child),
        }
    }
    a.sort_by_key(|c| c.index);
    a
}

/// Failure returned at the end of a validation pipeline: the payload tree
/// plus its flattened, human-readable messages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", .messages.join("\n"))]
pub struct ValidationError {
    /// Prefix applied to every message (e.g. `Object Invalid`).
    pub label: Option<String>,
    pub payload: ErrorPayload,
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(label: Option<&str>, payload: ErrorPayload, resolver: &dyn MessageResolver) -> Self {
        let messages = format::flatten_messages(&payload, resolver)
            .into_iter()
            .map(|msg| match label {
                Some(label) => format!("{}: {}", label, msg),
                None => msg,
            })
            .collect();
        Self {
            label: label.map(str::to_string),
            payload,
            messages,
        }
    }
}

/// Errors raised while loading or checking a constraint schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema does not conform to the meta-schema, or references
    /// predicates/transformers that are not registered.
    #[error("{0}")]
    Invalid(ValidationError),
    #[error(transparent)]
    Input(#[from] crate::input::InputError),
}

impl SchemaError {
    /// The payload tree, when the schema itself was malformed.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            SchemaError::Invalid(err) => Some(&err.payload),
            SchemaError::Input(_) => None,
        }
    }
}

/// Returns the JSON type name for a value.
#[doc(hidden)]
pub fn value_type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// Format a JSON value for display in errors (short form).
pub fn format_value_short(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("Array(len={})", arr.len()),
        Value::Object(obj) => format!("Object(keys={})", obj.len()),
    }
}
