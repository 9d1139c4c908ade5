//! Defaults applier.

use serde_json::{Map, Value};

use super::FieldConstraint;
use crate::validation::Validation;

/// Insert the default of every field whose key is absent.
///
/// Present keys are never overwritten, so applying twice equals applying
/// once. Always succeeds.
pub fn apply_defaults(fields: &[FieldConstraint], object: &Map<String, Value>) -> Validation<Map<String, Value>> {
    let mut out = object.clone();
    for field in fields {
        if let Some(default) = field.default_value_ref() {
            if !out.contains_key(field.name()) {
                tracing::trace!(field = field.name(), "applying default");
                out.insert(field.name().to_string(), default.clone());
            }
        }
    }
    Validation::Success(out)
}
