//! Recording stubs for predicates and transformers.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use conform::prelude::*;
use serde_json::Value;

/// Calls recorded by a stub, in order.
#[derive(Clone, Default)]
pub struct Calls(Arc<Mutex<Vec<Value>>>);

impl Calls {
    fn record(&self, value: &Value) {
        self.0.lock().unwrap().push(value.clone());
    }

    pub fn all(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn not_called(&self) -> bool {
        self.count() == 0
    }

    pub fn called_with(&self, value: &Value) -> bool {
        self.0.lock().unwrap().iter().any(|v| v == value)
    }
}

/// A predicate that records each call and answers with `respond`.
pub fn stub<F>(name: &'static str, respond: F) -> (Predicate, Calls)
where
    F: Fn(usize, &Value) -> Validation<Value> + Send + Sync + 'static,
{
    let calls = Calls::default();
    let recorder = calls.clone();
    let predicate = Predicate::new(name, move |value| {
        let n = recorder.count();
        recorder.record(value);
        respond(n, value)
    });
    (predicate, calls)
}

/// Records calls and succeeds with the input.
pub fn spy(name: &'static str) -> (Predicate, Calls) {
    stub(name, |_, value| Validation::Success(value.clone()))
}

/// Records calls and succeeds with a fixed value.
pub fn stub_returns_success(name: &'static str, result: Value) -> (Predicate, Calls) {
    stub(name, move |_, _| Validation::Success(result.clone()))
}

/// Records calls and fails with a fixed message.
pub fn stub_returns_failure(name: &'static str, message: &'static str) -> (Predicate, Calls) {
    stub(name, move |_, value| Validation::Failure(ErrorPayload::custom(message, value)))
}

/// A transformer that records each call and returns `result`.
pub fn stub_transformer(name: &'static str, result: Value) -> (Transformer, Calls) {
    let calls = Calls::default();
    let recorder = calls.clone();
    let transformer = Transformer::new(name, move |value| {
        recorder.record(&value);
        result.clone()
    });
    (transformer, calls)
}
