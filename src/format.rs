use serde_json::Value;

use crate::error::{format_value_short, ErrorPayload, PathSegment};
use crate::messages::{render_leaf, MessageResolver, ARRAY_INVALID};
use crate::render::{render_and_or, DefaultStyle};

// ---------------------------------------------------------------------------
// Lexical helpers
// ---------------------------------------------------------------------------

pub fn wrap_with_single_quotes(s: &str) -> String {
    format!("'{}'", s)
}

/// Render a list as `['a', 'b']`.
pub fn to_list(items: &[Value]) -> String {
    let inner: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => wrap_with_single_quotes(s),
            other => wrap_with_single_quotes(&other.to_string()),
        })
        .collect();
    format!("[{}]", inner.join(", "))
}

fn join_with_conjunction(parts: &[String], conjunction: &str) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}

/// `a`, `a and b`, `a, b and c`.
pub fn join_with_and(parts: &[String]) -> String {
    join_with_conjunction(parts, "and")
}

/// `a`, `a or b`, `a, b or c`.
pub fn join_with_or(parts: &[String]) -> String {
    join_with_conjunction(parts, "or")
}

pub fn pluralise(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

// ---------------------------------------------------------------------------
// Flattened messages
// ---------------------------------------------------------------------------

/// Flatten a payload tree into human-readable messages.
///
/// - whole-object failures render as-is;
/// - field failures render as `for field '<name>': <message>`;
/// - array element failures render as one line,
///   `Array contained invalid element(s): '1': <reason>, '3': <reason>`
///   (1-based, ascending);
/// - `And`/`Or` groups render as one line through the AND/OR renderer.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use conform::format::flatten_messages;
/// use conform::messages::english;
/// use serde_json::json;
///
/// let schema = conform::constraints()
///     .field(conform::field("a", conform::is_string()))
///     .field(conform::field("b", conform::is_number()));
/// let payload = schema.validate(&json!({"a": 1, "b": "x"})).failure().cloned().unwrap();
/// assert_eq!(
///     flatten_messages(&payload, &english()),
///     vec!["for field 'a': Wasn't String", "for field 'b': Wasn't Number"],
/// );
/// ```
pub fn flatten_messages(payload: &ErrorPayload, resolver: &dyn MessageResolver) -> Vec<String> {
    match payload {
        ErrorPayload::Leaf(info) => vec![render_leaf(info, resolver)],
        ErrorPayload::And(_) | ErrorPayload::Or(_) => {
            let leaf = |p: &ErrorPayload| flatten_messages(p, resolver).join(", ");
            vec![render_and_or(payload, &DefaultStyle, &leaf)]
        }
        ErrorPayload::FieldMap(fields) => fields
            .iter()
            .flat_map(|(name, p)| field_messages(name, p, resolver))
            .collect(),
        ErrorPayload::Grouped(group) => {
            let mut messages = Vec::new();
            if let Some(whole) = &group.fields_failure_message {
                messages.extend(flatten_messages(whole, resolver));
            }
            if let Some(fields) = &group.fields {
                for (name, p) in fields {
                    messages.extend(field_messages(name, p, resolver));
                }
            }
            if let Some(children) = group.children.as_ref().filter(|c| !c.is_empty()) {
                let elements: Vec<String> = children
                    .iter()
                    .map(|child| {
                        format!(
                            "{}: {}",
                            wrap_with_single_quotes(&(child.index + 1).to_string()),
                            flatten_messages(&child.payload, resolver).join(", ")
                        )
                    })
                    .collect();
                messages.push(format!("{}: {}", ARRAY_INVALID, elements.join(", ")));
            }
            messages
        }
    }
}

fn field_messages(name: &str, payload: &ErrorPayload, resolver: &dyn MessageResolver) -> Vec<String> {
    flatten_messages(payload, resolver)
        .into_iter()
        .map(|msg| format!("for field {}: {}", wrap_with_single_quotes(name), msg))
        .collect()
}

// ---------------------------------------------------------------------------
// Addressable issues
// ---------------------------------------------------------------------------

/// One failure with its location in the validated value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub message: String,
    /// The offending value, for leaves.
    pub received: Option<Value>,
}

/// Walk the tree depth-first and list every failure with its path.
///
/// `And`/`Or` groups are reported as a single issue at the group's path.
pub fn issues(payload: &ErrorPayload, resolver: &dyn MessageResolver) -> Vec<Issue> {
    let mut out = Vec::new();
    collect_issues(payload, &mut Vec::new(), resolver, &mut out);
    out
}

fn collect_issues(
    payload: &ErrorPayload,
    path: &mut Vec<PathSegment>,
    resolver: &dyn MessageResolver,
    out: &mut Vec<Issue>,
) {
    match payload {
        ErrorPayload::Leaf(info) => out.push(Issue {
            path: path.clone(),
            message: render_leaf(info, resolver),
            received: Some(info.value.clone()),
        }),
        ErrorPayload::And(_) | ErrorPayload::Or(_) => {
            let message = flatten_messages(payload, resolver).join(", ");
            out.push(Issue {
                path: path.clone(),
                message,
                received: None,
            });
        }
        ErrorPayload::FieldMap(fields) => {
            for (name, p) in fields {
                path.push(PathSegment::Field(name.clone()));
                collect_issues(p, path, resolver, out);
                path.pop();
            }
        }
        ErrorPayload::Grouped(group) => {
            if let Some(whole) = &group.fields_failure_message {
                collect_issues(whole, path, resolver, out);
            }
            if let Some(fields) = &group.fields {
                for (name, p) in fields {
                    path.push(PathSegment::Field(name.clone()));
                    collect_issues(p, path, resolver, out);
                    path.pop();
                }
            }
            for child in group.children.iter().flatten() {
                path.push(PathSegment::Index(child.index));
                collect_issues(&child.payload, path, resolver, out);
                path.pop();
            }
        }
    }
}

/// Format a payload into a human-readable string.
///
/// # Example output
/// ```text
/// ✖ Wasn't String
///   → at .name, received 5
/// ✖ Object was missing required key(s): ['id']
///   → at .items[1]
/// ```
pub fn prettify(payload: &ErrorPayload, resolver: &dyn MessageResolver) -> String {
    let mut lines = Vec::new();

    for issue in issues(payload, resolver) {
        lines.push(format!("✖ {}", issue.message));
        if !issue.path.is_empty() || issue.received.is_some() {
            let mut parts = Vec::new();
            if !issue.path.is_empty() {
                let path_str: String = issue.path.iter().map(|p| p.to_string()).collect();
                parts.push(format!("at {}", path_str));
            }
            if let Some(val) = &issue.received {
                parts.push(format!("received {}", format_value_short(val)));
            }
            lines.push(format!("  → {}", parts.join(", ")));
        }
    }

    lines.join("\n")
}
