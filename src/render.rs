//! AND/OR renderer.
//!
//! Renders a tree of `And`/`Or` failure groups depth-first. The top-level
//! group is joined bare; every nested group is wrapped by
//! [`AndOrStyle::group`], so `And[a, Or[b, c]]` renders as
//! `a and (b or c)` rather than the ambiguous `a and b or c`.

use crate::error::ErrorPayload;
use crate::format::{join_with_and, join_with_or};

/// Joining and grouping punctuation used by [`render_and_or`].
pub trait AndOrStyle {
    fn join_with_and(&self, parts: &[String]) -> String;
    fn join_with_or(&self, parts: &[String]) -> String;
    fn group(&self, rendered: String) -> String;
}

/// `a and b`, `a or b`, `(...)`.
pub struct DefaultStyle;

impl AndOrStyle for DefaultStyle {
    fn join_with_and(&self, parts: &[String]) -> String {
        join_with_and(parts)
    }

    fn join_with_or(&self, parts: &[String]) -> String {
        join_with_or(parts)
    }

    fn group(&self, rendered: String) -> String {
        format!("({})", rendered)
    }
}

/// Render `payload`; members that are not `And`/`Or` groups go through
/// `render_leaf`. A payload that is not a group at all is rendered as a
/// single leaf.
///
/// # Example
/// ```
/// use conform::prelude::*;
/// use conform::render::{render_and_or, DefaultStyle};
/// use serde_json::json;
///
/// let leaf = |msg: &str| ErrorPayload::custom(msg, &json!(null));
/// let tree = ErrorPayload::And(vec![
///     leaf("a"),
///     ErrorPayload::Or(vec![leaf("b"), leaf("c")]),
/// ]);
/// let text = render_and_or(&tree, &DefaultStyle, &|p: &ErrorPayload| {
///     p.as_leaf().and_then(|l| l.message.clone()).unwrap_or_default()
/// });
/// assert_eq!(text, "a and (b or c)");
/// ```
pub fn render_and_or<F>(payload: &ErrorPayload, style: &dyn AndOrStyle, render_leaf: &F) -> String
where
    F: Fn(&ErrorPayload) -> String,
{
    render(payload, 0, style, render_leaf)
}

fn render<F>(payload: &ErrorPayload, level: usize, style: &dyn AndOrStyle, render_leaf: &F) -> String
where
    F: Fn(&ErrorPayload) -> String,
{
    let (members, is_and) = match payload {
        ErrorPayload::And(members) => (members, true),
        ErrorPayload::Or(members) => (members, false),
        other => return render_leaf(other),
    };

    let parts: Vec<String> = members
        .iter()
        .map(|member| {
            if member.is_and_or() {
                render(member, level + 1, style, render_leaf)
            } else {
                render_leaf(member)
            }
        })
        .collect();

    let joined = if is_and {
        style.join_with_and(&parts)
    } else {
        style.join_with_or(&parts)
    };

    if level > 0 {
        style.group(joined)
    } else {
        joined
    }
}
