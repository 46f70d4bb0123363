//! Reusable host functions and class fixtures for tests.
//!
//! Contract tests mostly need the same few functions: one that returns its
//! argument, one that ignores its arguments, and one that records that it ran
//! so a test can observe side effects after a failed post-check.

use std::sync::{Arc, Mutex};

use crate::types::{Class, ClassEnv, ClassError};
use crate::value::Value;

/// Returns its first argument, or `undefined` when called with none
pub fn identity(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Undefined)
}

/// Ignores its arguments and returns `value`
pub fn constant(value: Value) -> impl Fn(&[Value]) -> Value + Send + Sync + Clone {
    move |_: &[Value]| value.clone()
}

/// Records every argument list it is called with, then returns `result`
#[derive(Debug, Clone)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
    result: Value,
}

impl Recorder {
    pub fn returning(result: Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// A function that records into this recorder
    pub fn func(&self) -> impl Fn(&[Value]) -> Value + Send + Sync {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        move |args: &[Value]| {
            if let Ok(mut calls) = calls.lock() {
                calls.push(args.to_vec());
            }
            result.clone()
        }
    }

    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

/// `Positive`: numbers greater than zero
pub fn positive() -> Class {
    Class::predicate(|v| v.as_number().is_some_and(|n| n > 0.0))
}

/// An environment with `Positive`, `Named` (has a `name` key) and `Any`
pub fn sample_env() -> Result<ClassEnv, ClassError> {
    ClassEnv::from_entries([
        ("Positive", positive()),
        ("Named", Class::shape(["name"])),
        ("Any", Class::predicate(|_| true)),
    ])
}
