//! Applicative validation result.
//!
//! [`Validation`] is `Result`-shaped, but combining two validations never
//! stops at the first failure: [`Validation::combine2`] and
//! [`Validation::combine_all`] evaluate everything and merge every failure
//! into one [`ErrorPayload`]. Use [`Validation::and_then`] only where a step
//! genuinely depends on the previous one succeeding.
//!
//! ```
//! use conform::prelude::*;
//! use serde_json::json;
//!
//! let a: Validation<i32> = Validation::Failure(ErrorPayload::custom("a failed", &json!(1)));
//! let b: Validation<i32> = Validation::Failure(ErrorPayload::custom("b failed", &json!(2)));
//! match a.combine2(b) {
//!     Validation::Failure(ErrorPayload::And(items)) => assert_eq!(items.len(), 2),
//!     _ => unreachable!(),
//! }
//! ```

use crate::error::ErrorPayload;

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Validation<T> {
    Success(T),
    Failure(ErrorPayload),
}

impl<T> Validation<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Validation::Success(v) => Some(v),
            Validation::Failure(_) => None,
        }
    }

    /// The failure payload, if any.
    pub fn failure(&self) -> Option<&ErrorPayload> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(p) => Some(p),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Validation<U> {
        match self {
            Validation::Success(v) => Validation::Success(f(v)),
            Validation::Failure(p) => Validation::Failure(p),
        }
    }

    pub fn map_failure<F: FnOnce(ErrorPayload) -> ErrorPayload>(self, f: F) -> Self {
        match self {
            Validation::Success(v) => Validation::Success(v),
            Validation::Failure(p) => Validation::Failure(f(p)),
        }
    }

    /// Sequential step: `f` only runs on success.
    pub fn and_then<U, F: FnOnce(T) -> Validation<U>>(self, f: F) -> Validation<U> {
        match self {
            Validation::Success(v) => f(v),
            Validation::Failure(p) => Validation::Failure(p),
        }
    }

    /// Combine two independent validations, keeping every failure.
    pub fn combine2<U>(self, other: Validation<U>) -> Validation<(T, U)> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(a), Validation::Failure(b)) => Validation::Failure(a.merge(b)),
            (Validation::Failure(a), Validation::Success(_))
            | (Validation::Success(_), Validation::Failure(a)) => Validation::Failure(a),
        }
    }

    /// Combine any number of independent validations.
    ///
    /// Every item is consumed, even after a failure has been seen.
    pub fn combine_all<I>(items: I) -> Validation<Vec<T>>
    where
        I: IntoIterator<Item = Validation<T>>,
    {
        let mut values = Vec::new();
        let mut failure: Option<ErrorPayload> = None;

        for item in items {
            match item {
                Validation::Success(v) => values.push(v),
                Validation::Failure(p) => {
                    failure = Some(match failure {
                        Some(acc) => acc.merge(p),
                        None => p,
                    });
                }
            }
        }

        match failure {
            Some(p) => Validation::Failure(p),
            None => Validation::Success(values),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorPayload> {
        self.into()
    }
}

impl<T> From<Result<T, ErrorPayload>> for Validation<T> {
    fn from(result: Result<T, ErrorPayload>) -> Self {
        match result {
            Ok(v) => Validation::Success(v),
            Err(p) => Validation::Failure(p),
        }
    }
}

impl<T> From<Validation<T>> for Result<T, ErrorPayload> {
    fn from(validation: Validation<T>) -> Self {
        match validation {
            Validation::Success(v) => Ok(v),
            Validation::Failure(p) => Err(p),
        }
    }
}
