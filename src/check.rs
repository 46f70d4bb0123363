//! Checking a list of values against a list of expected types
//!
//! A check runs in five passes over the same positions:
//!
//! 1. arity: the lists must be the same length
//! 2. concrete positions: the inferred type must match the expected one
//! 3. variable positions: unwrap the value by the expected array depth and
//!    record what is found there as the variable's representative
//! 4. consistency: every representative of a variable must agree
//! 5. constraints: every class declared for a variable must accept every
//!    representative
//!
//! Bindings never outlive a single check.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::config::CheckConfig;
use crate::infer::{HeterogeneousArray, Inferencer};
use crate::types::{compare_types, ClassEnv, Constraints, Type};
use crate::value::Value;

/// Call-time contract violations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    #[error("type list doesn't match actual values: bad type count: expected {expected}, got {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("type list doesn't match actual values: wrong types at position {position}: expected {expected}, got {found}")]
    TypeMismatch {
        position: usize,
        expected: Type,
        found: Type,
    },

    #[error("array depth mismatch at position {position}: expected {expected}, got {found}")]
    DepthMismatch {
        var: String,
        position: usize,
        expected: Type,
        found: Type,
    },

    #[error("inconsistent type variable {var}: {first} at position {first_position}, {second} at position {second_position}")]
    InconsistentTypeVariable {
        var: String,
        first: Type,
        first_position: usize,
        second: Type,
        second_position: usize,
    },

    #[error("unmet class constraint {class} on type variable {var} at position {position}")]
    UnmetConstraint {
        class: String,
        var: String,
        position: usize,
    },

    #[error("heterogeneous array at position {position}: element {index} is {found}, earlier elements are {expected}")]
    HeterogeneousArray {
        position: usize,
        index: usize,
        expected: Type,
        found: Type,
    },

    #[error("type class is not defined: {class}")]
    UnknownClass { class: String, var: String },
}

impl ContractError {
    /// Index into the checked type list the error is about, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            ContractError::ArityMismatch { .. } | ContractError::UnknownClass { .. } => None,
            ContractError::TypeMismatch { position, .. }
            | ContractError::DepthMismatch { position, .. }
            | ContractError::UnmetConstraint { position, .. }
            | ContractError::HeterogeneousArray { position, .. } => Some(*position),
            ContractError::InconsistentTypeVariable {
                second_position, ..
            } => Some(*second_position),
        }
    }

    fn heterogeneous(position: usize, err: HeterogeneousArray) -> Self {
        ContractError::HeterogeneousArray {
            position,
            index: err.index,
            expected: err.expected,
            found: err.found,
        }
    }
}

/// One value recorded for a type variable
#[derive(Debug, Clone, Copy)]
struct Binding<'v> {
    position: usize,
    value: &'v Value,
}

type Bindings<'t> = BTreeMap<&'t str, Vec<Binding<'t>>>;

enum Unwrapped<'v> {
    Representative(&'v Value),
    /// An empty array was met on the way down
    Vacuous,
    /// A non-array was met before reaching the requested depth
    TooShallow,
}

/// Follow first elements `depth` levels down
fn unwrap_depth(value: &Value, depth: usize) -> Unwrapped<'_> {
    let mut current = value;
    for _ in 0..depth {
        match current {
            Value::Array(items) => match items.first() {
                Some(first) => current = first,
                None => return Unwrapped::Vacuous,
            },
            _ => return Unwrapped::TooShallow,
        }
    }
    Unwrapped::Representative(current)
}

/// Checks values against types under one constraint map and environment
pub struct Checker<'a> {
    env: &'a ClassEnv,
    constraints: &'a Constraints,
    inferencer: Inferencer,
}

impl<'a> Checker<'a> {
    pub fn new(env: &'a ClassEnv, constraints: &'a Constraints, config: &CheckConfig) -> Self {
        Self {
            env,
            constraints,
            inferencer: Inferencer::new(config),
        }
    }

    pub fn check(&self, expected: &[Type], values: &[Value]) -> Result<(), ContractError> {
        if expected.len() != values.len() {
            return Err(ContractError::ArityMismatch {
                expected: expected.len(),
                found: values.len(),
            });
        }

        let actual = values
            .iter()
            .enumerate()
            .map(|(position, value)| {
                self.inferencer
                    .infer(value)
                    .map_err(|e| ContractError::heterogeneous(position, e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.check_concrete(expected, &actual)?;
        let bindings = self.bind_variables(expected, values, &actual)?;
        self.check_consistency(&bindings)?;
        self.check_constraints(&bindings)
    }

    fn check_concrete(&self, expected: &[Type], actual: &[Type]) -> Result<(), ContractError> {
        for (position, (exp, act)) in expected.iter().zip(actual).enumerate() {
            tracing::trace!(position, expected = %exp, actual = %act, "inferred");
            if exp.is_concrete() && !compare_types(exp, act) {
                return Err(ContractError::TypeMismatch {
                    position,
                    expected: exp.clone(),
                    found: act.clone(),
                });
            }
        }
        Ok(())
    }

    fn bind_variables<'t>(
        &self,
        expected: &'t [Type],
        values: &'t [Value],
        actual: &[Type],
    ) -> Result<Bindings<'t>, ContractError> {
        let mut bindings = Bindings::new();

        for (position, ((exp, value), act)) in expected.iter().zip(values).zip(actual).enumerate() {
            let Some(var) = exp.var_name() else {
                continue;
            };

            let too_shallow = || ContractError::DepthMismatch {
                var: var.to_string(),
                position,
                expected: exp.clone(),
                found: act.clone(),
            };
            if exp.depth > act.depth && !act.is_wildcard() {
                return Err(too_shallow());
            }

            match unwrap_depth(value, exp.depth) {
                Unwrapped::Representative(rep) => {
                    tracing::trace!(var, position, value = %rep, "bound type variable");
                    bindings
                        .entry(var)
                        .or_default()
                        .push(Binding { position, value: rep });
                }
                Unwrapped::Vacuous => {
                    tracing::trace!(var, position, "empty array, nothing to bind");
                }
                Unwrapped::TooShallow if act.is_wildcard() => {
                    tracing::trace!(var, position, "undefined, nothing to bind");
                }
                Unwrapped::TooShallow => return Err(too_shallow()),
            }
        }

        Ok(bindings)
    }

    fn check_consistency(&self, bindings: &Bindings<'_>) -> Result<(), ContractError> {
        for (var, bound) in bindings {
            let typed = bound
                .iter()
                .map(|b| {
                    self.inferencer
                        .infer(b.value)
                        .map(|ty| (b.position, ty))
                        .map_err(|e| ContractError::heterogeneous(b.position, e))
                })
                .collect::<Result<Vec<_>, _>>()?;

            for (i, (first_position, first)) in typed.iter().enumerate() {
                for (second_position, second) in &typed[i + 1..] {
                    if !compare_types(first, second) {
                        return Err(ContractError::InconsistentTypeVariable {
                            var: var.to_string(),
                            first: first.clone(),
                            first_position: *first_position,
                            second: second.clone(),
                            second_position: *second_position,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check_constraints(&self, bindings: &Bindings<'_>) -> Result<(), ContractError> {
        for (var, classes) in self.constraints {
            let Some(bound) = bindings.get(var.as_str()) else {
                continue;
            };
            for class_name in classes {
                let class = self
                    .env
                    .get(class_name)
                    .ok_or_else(|| ContractError::UnknownClass {
                        class: class_name.clone(),
                        var: var.clone(),
                    })?;
                if let Some(failed) = bound.iter().find(|b| !class.test(b.value)) {
                    return Err(ContractError::UnmetConstraint {
                        class: class_name.clone(),
                        var: var.clone(),
                        position: failed.position,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Check with the default configuration
pub fn check_signature(
    env: &ClassEnv,
    constraints: &Constraints,
    expected: &[Type],
    values: &[Value],
) -> Result<(), ContractError> {
    Checker::new(env, constraints, &CheckConfig::default()).check(expected, values)
}
