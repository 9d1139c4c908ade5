//! Transform applier.

use serde_json::{Map, Value};

use super::FieldConstraint;
use crate::validation::Validation;

/// Replace each present field that has a transformer with the transformed
/// value. Absent keys stay absent.
pub fn apply_transforms(fields: &[FieldConstraint], mut object: Map<String, Value>) -> Validation<Map<String, Value>> {
    for field in fields {
        let Some(transformer) = field.transformer_ref() else {
            continue;
        };
        if let Some(slot) = object.get_mut(field.name()) {
            tracing::trace!(field = field.name(), transformer = transformer.name(), "transforming");
            let current = std::mem::take(slot);
            *slot = transformer.apply(current);
        }
    }
    Validation::Success(object)
}
