use crate::error::ErrorPayload;
use crate::validation::Validation;
use crate::validator::{Predicate, Validator};

fn joined_names(predicates: &[Predicate]) -> String {
    predicates
        .iter()
        .map(Predicate::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Every predicate must pass. All of them run; two or more failures are
/// reported together as an `And` group.
pub fn all_of(predicates: Vec<Predicate>) -> Predicate {
    let name = format!("allOf({})", joined_names(&predicates));
    Predicate::new(name, move |value| {
        Validation::combine_all(predicates.iter().map(|p| p.validate(value)))
            .map(|_| value.clone())
    })
}

/// At least one predicate must pass. When none does, every failure is
/// reported as an `Or` group.
pub fn any_of(predicates: Vec<Predicate>) -> Predicate {
    let name = format!("anyOf({})", joined_names(&predicates));
    Predicate::new(name, move |value| {
        let mut failures = Vec::with_capacity(predicates.len());
        for predicate in &predicates {
            match predicate.validate(value) {
                Validation::Success(_) => return Validation::Success(value.clone()),
                Validation::Failure(p) => failures.push(p),
            }
        }
        match failures.len() {
            0 => Validation::Success(value.clone()),
            1 => Validation::Failure(failures.remove(0)),
            _ => Validation::Failure(ErrorPayload::Or(failures)),
        }
    })
}
