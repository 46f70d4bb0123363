//! Checker configuration

/// What inference does with an array whose elements disagree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayPolicy {
    /// Treat the array as an opaque `object`
    #[default]
    Opaque,
    /// Fail the check with a heterogeneous-array error
    Reject,
}

/// Options for contract checking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckConfig {
    pub heterogeneous_arrays: ArrayPolicy,
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_array_policy(mut self, policy: ArrayPolicy) -> Self {
        self.heterogeneous_arrays = policy;
        self
    }
}
