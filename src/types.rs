//! Type descriptors, parsed signatures and the type-class environment

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::ast::{Ident, Span, SourceMap};
use crate::value::Value;

/// The fixed concrete type names of the signature language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Object,
    Function,
    Symbol,
}

impl Primitive {
    pub const ALL: [Primitive; 6] = [
        Primitive::String,
        Primitive::Number,
        Primitive::Boolean,
        Primitive::Object,
        Primitive::Function,
        Primitive::Symbol,
    ];

    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Object => "object",
            Primitive::Function => "function",
            Primitive::Symbol => "symbol",
        }
    }
}

/// What sits inside the brackets of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Primitive(Primitive),
    /// Inferred for empty arrays (and `undefined`); never produced by the parser
    Wildcard,
    /// Any identifier that is not a primitive name
    Var(Ident),
}

impl BaseType {
    /// Classify an identifier from a signature
    pub fn from_name(name: &str) -> BaseType {
        match Primitive::from_name(name) {
            Some(p) => BaseType::Primitive(p),
            None => BaseType::Var(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BaseType::Primitive(p) => p.name(),
            BaseType::Wildcard => "undefined",
            BaseType::Var(name) => name,
        }
    }
}

/// A base type wrapped in `depth` levels of array
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub base: BaseType,
    pub depth: usize,
}

impl Type {
    pub fn new(base: BaseType, depth: usize) -> Self {
        Self { base, depth }
    }

    pub fn primitive(p: Primitive) -> Self {
        Self::new(BaseType::Primitive(p), 0)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Self::new(BaseType::Var(name.into()), 0)
    }

    /// The empty-array descriptor
    pub fn wildcard(depth: usize) -> Self {
        Self::new(BaseType::Wildcard, depth)
    }

    /// Wrap in one more level of array
    pub fn array_of(self) -> Self {
        Self::new(self.base, self.depth + 1)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.base, BaseType::Wildcard)
    }

    pub fn var_name(&self) -> Option<&str> {
        match &self.base {
            BaseType::Var(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_concrete(&self) -> bool {
        matches!(self.base, BaseType::Primitive(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            write!(f, "[")?;
        }
        write!(f, "{}", self.base.name())?;
        for _ in 0..self.depth {
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Structural equality, with the wildcard matching any type at least as deep.
///
/// `compare_types(a, b) == compare_types(b, a)` always holds. The relation is
/// not transitive: `[undefined]` matches both `[number]` and `[string]`.
pub fn compare_types(a: &Type, b: &Type) -> bool {
    if a == b {
        return true;
    }
    (a.is_wildcard() && a.depth <= b.depth) || (b.is_wildcard() && b.depth <= a.depth)
}

/// Type variable name -> class names it must satisfy, in declaration order
pub type Constraints = BTreeMap<Ident, Vec<Ident>>;

/// A parsed signature: constraints plus parameter and return types
#[derive(Debug, Clone)]
pub struct Signature {
    source: SourceMap,
    constraints: Constraints,
    /// Where each clause appeared, for diagnostics
    constraint_spans: Vec<(Ident, Span)>,
    types: Vec<Type>,
    type_spans: Vec<Span>,
}

impl Signature {
    pub(crate) fn new(
        source: &str,
        clauses: Vec<crate::ast::ConstraintClause>,
        types: Vec<crate::ast::TypeExpr>,
    ) -> Self {
        let mut constraints = Constraints::new();
        let mut constraint_spans = Vec::with_capacity(clauses.len());
        for clause in clauses {
            constraint_spans.push((clause.class.clone(), clause.span));
            constraints.entry(clause.var).or_default().push(clause.class);
        }
        let (types, type_spans) = types.into_iter().map(|t| (t.node, t.span)).unzip();
        Self {
            source: SourceMap::new(source),
            constraints,
            constraint_spans,
            types,
            type_spans,
        }
    }

    /// The signature text this was parsed from
    pub fn source(&self) -> &str {
        self.source.source()
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// All types: parameters followed by the return type
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    pub fn params(&self) -> &[Type] {
        &self.types[..self.arity()]
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.types.last()
    }

    /// Number of parameters; zero for `() -> t`
    pub fn arity(&self) -> usize {
        self.types.len().saturating_sub(1)
    }

    /// Span of the type at `position` in the full type list
    pub fn type_span(&self, position: usize) -> Option<&Span> {
        self.type_spans.get(position)
    }

    /// Span of the first constraint clause naming `class`
    pub fn class_span(&self, class: &str) -> Option<&Span> {
        self.constraint_spans
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, span)| span)
    }

    /// Class names referenced by the constraint block, in source order
    pub fn referenced_classes(&self) -> impl Iterator<Item = &str> {
        self.constraint_spans.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .constraints
            .iter()
            .flat_map(|(var, classes)| classes.iter().map(move |c| format!("{} {}", c, var)))
            .collect();
        if !clauses.is_empty() {
            write!(f, "{} => ", clauses.join(", "))?;
        }
        if self.arity() == 0 {
            write!(f, "() -> ")?;
        }
        let types: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", types.join(" -> "))
    }
}

// ============================================================================
// Type-class environment
// ============================================================================

pub type Predicate = dyn Fn(&Value) -> bool + Send + Sync;

/// A named predicate a type variable's values must satisfy
#[derive(Clone)]
pub enum Class {
    /// Arbitrary membership test
    Predicate(Arc<Predicate>),
    /// Membership means having every one of these keys
    Shape(Vec<String>),
}

impl Class {
    pub fn predicate(f: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Class::Predicate(Arc::new(f))
    }

    pub fn shape<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        Class::Shape(keys.into_iter().map(Into::into).collect())
    }

    /// Build a shape from the keys of a sample object. Non-objects have no
    /// keys and so produce a class every value satisfies.
    pub fn from_sample(sample: &Value) -> Self {
        match sample {
            Value::Object(fields) => Class::Shape(fields.keys().cloned().collect()),
            _ => Class::Shape(Vec::new()),
        }
    }

    pub fn test(&self, value: &Value) -> bool {
        match self {
            Class::Predicate(f) => f(value),
            Class::Shape(keys) => keys.iter().all(|k| value.has_key(k)),
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Predicate(_) => write!(f, "Predicate(<fn>)"),
            Class::Shape(keys) => f.debug_tuple("Shape").field(keys).finish(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassError {
    #[error("duplicate type class: {0}")]
    DuplicateClass(String),
}

/// Registered type classes by name
#[derive(Debug, Clone, Default)]
pub struct ClassEnv {
    classes: HashMap<String, Class>,
}

impl ClassEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an environment from `(name, class)` pairs, rejecting repeats
    pub fn from_entries<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, Class)>,
    ) -> Result<Self, ClassError> {
        let mut env = ClassEnv::new();
        for (name, class) in entries {
            env.register(name, class)?;
        }
        Ok(env)
    }

    /// Register a class. Names are registered once.
    pub fn register(&mut self, name: impl Into<String>, class: Class) -> Result<(), ClassError> {
        let name = name.into();
        if self.classes.contains_key(&name) {
            return Err(ClassError::DuplicateClass(name));
        }
        tracing::trace!(class = %name, "registered type class");
        self.classes.insert(name, class);
        Ok(())
    }

    /// Builder-style `register`
    pub fn with_class(mut self, name: impl Into<String>, class: Class) -> Result<Self, ClassError> {
        self.register(name, class)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
