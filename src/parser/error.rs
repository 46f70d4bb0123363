//! Errors raised while building a signature

use std::fmt;

use thiserror::Error;

use crate::ast::Span;
use crate::lexer::{LexError, Token};

/// Which half of the signature an error was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Constraints,
    TypeList,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Constraints => write!(f, "class constraints"),
            Block::TypeList => write!(f, "type list"),
        }
    }
}

/// Construction-time failures: every variant but `UnknownClass` is a syntax
/// error, `UnknownClass` is a reference error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignatureError {
    #[error("malformed signature: empty type list")]
    EmptyTypeList { span: Span },

    #[error("malformed signature: invalid character {ch:?} in {block}")]
    InvalidCharacter { ch: char, block: Block, span: Span },

    #[error("malformed signature: invalid use of brackets in type list")]
    MalformedBrackets { span: Span },

    #[error("malformed signature: malformed arrow in type list")]
    MalformedArrow { span: Span },

    #[error("malformed signature: parentheses must form `()`")]
    MalformedUnit { span: Span },

    #[error("malformed signature: `()` may only stand for the parameters of a zero-argument function")]
    MisplacedUnit { span: Span },

    #[error("malformed signature: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("malformed signature: too few types in type list (found {found}, need at least 2)")]
    TooFewTypes { found: usize, span: Span },

    #[error("malformed signature: malformed class constraint `{clause}`")]
    MalformedConstraint { clause: String, span: Span },

    #[error("type class is not defined: {name}")]
    UnknownClass {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },
}

impl SignatureError {
    pub fn span(&self) -> &Span {
        match self {
            SignatureError::EmptyTypeList { span }
            | SignatureError::InvalidCharacter { span, .. }
            | SignatureError::MalformedBrackets { span }
            | SignatureError::MalformedArrow { span }
            | SignatureError::MalformedUnit { span }
            | SignatureError::MisplacedUnit { span }
            | SignatureError::UnexpectedToken { span, .. }
            | SignatureError::TooFewTypes { span, .. }
            | SignatureError::MalformedConstraint { span, .. }
            | SignatureError::UnknownClass { span, .. } => span,
        }
    }

    pub fn is_syntax(&self) -> bool {
        !self.is_reference()
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, SignatureError::UnknownClass { .. })
    }

    pub fn unexpected(expected: impl Into<String>, found: &Token, span: Span) -> Self {
        SignatureError::UnexpectedToken {
            expected: expected.into(),
            found: found.describe(),
            span,
        }
    }
}

impl From<LexError> for SignatureError {
    fn from(err: LexError) -> Self {
        match err {
            LexError::UnexpectedChar(ch, span) => SignatureError::InvalidCharacter {
                ch,
                block: Block::TypeList,
                span,
            },
            LexError::MalformedArrow(span) => SignatureError::MalformedArrow { span },
            LexError::MalformedUnit(span) => SignatureError::MalformedUnit { span },
        }
    }
}

pub type SignatureResult<T> = Result<T, SignatureError>;
