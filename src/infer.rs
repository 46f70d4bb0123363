//! Structural type inference for host values

use thiserror::Error;

use crate::config::{ArrayPolicy, CheckConfig};
use crate::types::{Primitive, Type};
use crate::value::Value;

/// An array whose elements do not share a type, under `ArrayPolicy::Reject`
#[derive(Error, Debug, Clone, PartialEq)]
#[error("heterogeneous array: element {index} is {found}, earlier elements are {expected}")]
pub struct HeterogeneousArray {
    pub index: usize,
    pub expected: Type,
    pub found: Type,
}

#[derive(Debug, Clone, Default)]
pub struct Inferencer {
    policy: ArrayPolicy,
}

impl Inferencer {
    pub fn new(config: &CheckConfig) -> Self {
        Self {
            policy: config.heterogeneous_arrays,
        }
    }

    pub fn with_policy(policy: ArrayPolicy) -> Self {
        Self { policy }
    }

    /// Infer the descriptor of a value.
    ///
    /// Scalars get their `typeof` kind at depth 0 (`undefined` becomes the
    /// wildcard). An array is one level deeper than its elements, which must
    /// all infer to the same descriptor; an empty array is `[undefined]`.
    pub fn infer(&self, value: &Value) -> Result<Type, HeterogeneousArray> {
        let Value::Array(items) = value else {
            return Ok(match value.primitive() {
                Some(p) => Type::primitive(p),
                None => Type::wildcard(0),
            });
        };

        let Some((first, rest)) = items.split_first() else {
            return Ok(Type::wildcard(1));
        };

        let element = self.infer(first)?;
        for (i, item) in rest.iter().enumerate() {
            let found = self.infer(item)?;
            if found == element {
                continue;
            }
            tracing::trace!(expected = %element, %found, index = i + 1, "heterogeneous array");
            return match self.policy {
                ArrayPolicy::Opaque => Ok(Type::primitive(Primitive::Object)),
                ArrayPolicy::Reject => Err(HeterogeneousArray {
                    index: i + 1,
                    expected: element,
                    found,
                }),
            };
        }

        Ok(element.array_of())
    }
}

/// Infer with the default policy, which never fails
pub fn infer_type(value: &Value) -> Type {
    Inferencer::default()
        .infer(value)
        .unwrap_or_else(|_| Type::primitive(Primitive::Object))
}
