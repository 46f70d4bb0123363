//! Host values checked against signatures
//!
//! The model mirrors a dynamically-typed host: every value has a runtime
//! kind (what `typeof` would report) and arrays nest arbitrarily.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::types::Primitive;

/// Signature of a host function: a fixed argument list in, one value out
pub type HostFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A callable host value
#[derive(Clone)]
pub struct Function {
    name: Option<String>,
    call: Arc<HostFn>,
}

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: None,
            call: Arc::new(f),
        }
    }

    pub fn named(
        name: impl Into<String>,
        f: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Some(name.into()),
            call: Arc::new(f),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.call)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<function {}>", name),
            None => write!(f, "<function>"),
        }
    }
}

/// Functions compare by identity
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

/// Runtime values
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    /// A symbol, identified by its description
    Symbol(String),
    Function(Function),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Value {
        Value::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn function(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Value {
        Value::Function(Function::new(f))
    }

    pub fn symbol(description: impl Into<String>) -> Value {
        Value::Symbol(description.into())
    }

    /// The kind a `typeof` check would report. `undefined` has none.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Value::Undefined => None,
            Value::Null | Value::Array(_) | Value::Object(_) => Some(Primitive::Object),
            Value::Boolean(_) => Some(Primitive::Boolean),
            Value::Number(_) => Some(Primitive::Number),
            Value::String(_) => Some(Primitive::String),
            Value::Symbol(_) => Some(Primitive::Symbol),
            Value::Function(_) => Some(Primitive::Function),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.primitive() {
            Some(p) => p.name(),
            None => "undefined",
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value has an own property named `key`.
    /// Only objects carry named properties in this model.
    pub fn has_key(&self, key: &str) -> bool {
        match self {
            Value::Object(fields) => fields.contains_key(key),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(desc) => write!(f, "Symbol({})", desc),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", k, v)?;
                }
                if !fields.is_empty() {
                    write!(f, " ")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typeof_kinds() {
        assert_eq!(Value::from(1).type_name(), "number");
        assert_eq!(Value::from("a").type_name(), "string");
        assert_eq!(Value::from(true).type_name(), "boolean");
        assert_eq!(Value::Null.type_name(), "object");
        assert_eq!(Value::array([]).type_name(), "object");
        assert_eq!(Value::symbol("s").type_name(), "symbol");
        assert_eq!(Value::function(|_| Value::Undefined).type_name(), "function");
        assert_eq!(Value::Undefined.type_name(), "undefined");
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"xs": [1, 2], "name": "n", "flag": null}));
        assert!(value.has_key("xs"));
        assert!(value.has_key("flag"));
        assert!(!value.has_key("missing"));
        assert_eq!(
            value,
            Value::object([
                ("flag", Value::Null),
                ("name", Value::from("n")),
                ("xs", Value::array([Value::from(1), Value::from(2)])),
            ])
        );
    }

    #[test]
    fn test_only_objects_have_keys() {
        assert!(!Value::from("length").has_key("length"));
        assert!(!Value::array([Value::from(1)]).has_key("0"));
    }

    #[test]
    fn test_function_identity() {
        let f = Function::named("id", |args| args[0].clone());
        let g = f.clone();
        let h = Function::named("id", |args| args[0].clone());
        assert_eq!(f, g);
        assert_ne!(f, h);
        assert_eq!(f.call(&[Value::from(3)]), Value::from(3));
    }

    #[test]
    fn test_display() {
        let value = Value::from(json!([[1, 2.5], {"a": "b"}]));
        assert_eq!(value.to_string(), "[[1, 2.5], { a: \"b\" }]");
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).to_string(), "{}");
    }
}
