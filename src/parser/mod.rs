//! Signature parser
//!
//! A signature has an optional constraint block followed by an arrow
//! separated type list:
//!
//! ```text
//! Ord a, Show b => [a] -> b -> string
//! ```
//!
//! # Module Structure
//!
//! - `cursor` - Token stream navigation and lookahead
//! - `error` - Error types with source location tracking
//! - `types` - Type list parsing
//! - `constraints` - Constraint block parsing
//!
//! The type list is screened with cheap character-level checks before it is
//! tokenized, so the commonest mistakes (stray symbols, brackets around an
//! arrow) get a precise error instead of a generic unexpected token.

pub mod constraints;
pub mod cursor;
pub mod error;
pub mod types;

pub use cursor::TokenCursor;
pub use error::{Block, SignatureError, SignatureResult};

use crate::ast::Span;
use crate::lexer::Lexer;
use crate::types::Signature;

use self::constraints::parse_constraints;
use self::types::TypeParser;

fn is_type_list_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '>' | '(' | ')' | '[' | ']')
}

/// Parser for one signature string
pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse the signature, without looking at any class environment
    pub fn parse(&self) -> SignatureResult<Signature> {
        let (constraint_text, types_offset) = match self.source.find("=>") {
            Some(at) => (Some(&self.source[..at]), at + 2),
            None => (None, 0),
        };
        let type_text = &self.source[types_offset..];

        self.check_type_list(type_text, types_offset)?;

        let clauses = match constraint_text {
            Some(text) => parse_constraints(text, 0)?,
            None => Vec::new(),
        };

        let tokens = Lexer::new(type_text).with_offset(types_offset).tokenize()?;
        let types = TokenCursor::new(tokens).parse_type_list()?;

        let signature = Signature::new(self.source, clauses, types);
        tracing::debug!(
            signature = %self.source,
            arity = signature.arity(),
            constraints = signature.constraints().len(),
            "parsed signature"
        );
        Ok(signature)
    }

    /// Character-level screening of the type list
    fn check_type_list(&self, text: &str, offset: usize) -> SignatureResult<()> {
        if text.trim().is_empty() {
            return Err(SignatureError::EmptyTypeList {
                span: Span::new(offset, self.source.len()),
            });
        }

        if let Some((i, ch)) = text.char_indices().find(|&(_, c)| !is_type_list_char(c)) {
            return Err(SignatureError::InvalidCharacter {
                ch,
                block: Block::TypeList,
                span: Span::new(offset + i, offset + i + ch.len_utf8()),
            });
        }

        // Arrows may not appear inside brackets, and brackets may not close
        // before they open.
        let mut depth: i64 = 0;
        for (i, c) in text.char_indices() {
            match c {
                '[' => depth += 1,
                ']' => depth -= 1,
                _ => {}
            }
            if (c == '-' && depth != 0) || depth < 0 {
                return Err(SignatureError::MalformedBrackets {
                    span: Span::new(offset + i, offset + i + 1),
                });
            }
        }

        let segments = text.split("->").count();
        if segments < 2 {
            return Err(SignatureError::TooFewTypes {
                found: segments,
                span: Span::new(offset, self.source.len()),
            });
        }

        Ok(())
    }
}

/// Parse a signature string
pub fn parse_signature(source: &str) -> SignatureResult<Signature> {
    Parser::new(source).parse()
}
