//! Wrapping host functions in signature contracts

use std::fmt;
use std::sync::Arc;

use crate::check::{Checker, ContractError};
use crate::config::CheckConfig;
use crate::errors::find_similar;
use crate::parser::{parse_signature, SignatureError, SignatureResult};
use crate::types::{ClassEnv, Signature};
use crate::value::Value;

/// Every class the signature names must be registered
fn check_classes(signature: &Signature, env: &ClassEnv) -> SignatureResult<()> {
    for name in signature.referenced_classes() {
        if env.contains(name) {
            continue;
        }
        let suggestions = find_similar(name, env.names(), 2);
        return Err(SignatureError::UnknownClass {
            name: name.to_string(),
            span: signature.class_span(name).cloned().unwrap_or_default(),
            suggestions,
        });
    }
    Ok(())
}

/// A host function guarded by a signature.
///
/// Each call checks the arguments against the parameter types, runs the
/// function, then checks arguments and result against the full type list.
/// The function has already run when the second check fails, so its side
/// effects are not undone.
pub struct Signed<F> {
    signature: Arc<Signature>,
    env: Arc<ClassEnv>,
    config: CheckConfig,
    func: F,
}

impl<F> Signed<F>
where
    F: Fn(&[Value]) -> Value,
{
    pub fn call(&self, args: &[Value]) -> Result<Value, ContractError> {
        let checker = Checker::new(&self.env, self.signature.constraints(), &self.config);

        checker
            .check(self.signature.params(), args)
            .map_err(|e| self.rejected("arguments", e))?;

        let result = (self.func)(args);

        let mut values = Vec::with_capacity(args.len() + 1);
        values.extend_from_slice(args);
        values.push(result);
        checker
            .check(self.signature.types(), &values)
            .map_err(|e| self.rejected("result", e))?;

        Ok(values.swap_remove(args.len()))
    }
}

impl<F> Signed<F> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn env(&self) -> &Arc<ClassEnv> {
        &self.env
    }

    /// Number of arguments the signature declares
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }

    fn rejected(&self, stage: &str, err: ContractError) -> ContractError {
        tracing::debug!(signature = %self.signature.source(), stage, error = %err, "contract violated");
        err
    }
}

impl<F> fmt::Debug for Signed<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signed")
            .field("signature", &self.signature.source())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parse `signature`, check its classes against `env`, and wrap `func`
pub fn sign<F>(env: &Arc<ClassEnv>, signature: &str, func: F) -> SignatureResult<Signed<F>>
where
    F: Fn(&[Value]) -> Value,
{
    sign_with_config(env, signature, CheckConfig::default(), func)
}

pub fn sign_with_config<F>(
    env: &Arc<ClassEnv>,
    signature: &str,
    config: CheckConfig,
    func: F,
) -> SignatureResult<Signed<F>>
where
    F: Fn(&[Value]) -> Value,
{
    let parsed = parse_signature(signature)?;
    check_classes(&parsed, env)?;
    tracing::debug!(signature, arity = parsed.arity(), "signed function");
    Ok(Signed {
        signature: Arc::new(parsed),
        env: Arc::clone(env),
        config,
        func,
    })
}

/// Signs functions against one shared class environment
#[derive(Debug, Clone, Default)]
pub struct Notary {
    env: Arc<ClassEnv>,
    config: CheckConfig,
}

impl Notary {
    pub fn new(env: ClassEnv) -> Self {
        Self::from_shared(Arc::new(env))
    }

    pub fn from_shared(env: Arc<ClassEnv>) -> Self {
        Self {
            env,
            config: CheckConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CheckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn env(&self) -> &Arc<ClassEnv> {
        &self.env
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    pub fn sign<F>(&self, signature: &str, func: F) -> SignatureResult<Signed<F>>
    where
        F: Fn(&[Value]) -> Value,
    {
        sign_with_config(&self.env, signature, self.config.clone(), func)
    }
}
