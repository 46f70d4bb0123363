//! Type list parsing: `() -> [[a]] -> number`

use crate::ast::{Spanned, TypeExpr};
use crate::lexer::Token;
use crate::types::{BaseType, Type};

use super::cursor::TokenCursor;
use super::error::{SignatureError, SignatureResult};

/// Extension trait for type list parsing
pub trait TypeParser {
    /// Parse the whole arrow-separated list. A leading `()` is consumed and
    /// contributes no entry.
    fn parse_type_list(&mut self) -> SignatureResult<Vec<TypeExpr>>;

    /// Parse one entry: `'['* Ident ']'*` with balanced brackets
    fn parse_type(&mut self) -> SignatureResult<TypeExpr>;
}

impl TypeParser for TokenCursor {
    fn parse_type_list(&mut self) -> SignatureResult<Vec<TypeExpr>> {
        let mut types = Vec::new();
        let mut segments = 0;

        if self.match_token(&Token::Unit) {
            segments += 1;
            if !self.check(&Token::Arrow) {
                return Err(SignatureError::TooFewTypes {
                    found: segments,
                    span: self.previous_span(),
                });
            }
            self.advance();
        }

        loop {
            types.push(self.parse_type()?);
            segments += 1;

            match self.peek() {
                Token::Arrow => {
                    self.advance();
                }
                Token::Eof => break,
                Token::LBracket | Token::RBracket => {
                    return Err(SignatureError::MalformedBrackets {
                        span: self.current_span(),
                    })
                }
                _ => return Err(self.unexpected("`->`")),
            }
        }

        if segments < 2 {
            let span = types
                .first()
                .map(|t| t.span.clone())
                .unwrap_or_else(|| self.current_span());
            return Err(SignatureError::TooFewTypes {
                found: segments,
                span,
            });
        }

        Ok(types)
    }

    fn parse_type(&mut self) -> SignatureResult<TypeExpr> {
        let mut opens = Vec::new();
        while self.check(&Token::LBracket) {
            opens.push(self.advance());
        }

        let (name, name_span) = match self.peek().clone() {
            Token::Ident(name) => (name, self.advance()),
            Token::Unit => {
                return Err(SignatureError::MisplacedUnit {
                    span: self.current_span(),
                })
            }
            Token::RBracket => {
                return Err(SignatureError::MalformedBrackets {
                    span: self.current_span(),
                })
            }
            _ => return Err(self.unexpected("a type")),
        };

        let mut ty = Type::new(BaseType::from_name(&name), 0);
        let mut span = name_span;
        for open in opens.iter().rev() {
            if !self.check(&Token::RBracket) {
                return Err(SignatureError::MalformedBrackets {
                    span: open.merge(&self.current_span()),
                });
            }
            span = open.merge(&self.advance());
            ty = ty.array_of();
        }

        Ok(Spanned::new(ty, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::lexer::Lexer;
    use crate::types::Primitive;

    fn cursor(input: &str) -> TokenCursor {
        TokenCursor::new(Lexer::new(input).tokenize().unwrap())
    }

    fn parse_list(input: &str) -> SignatureResult<Vec<Type>> {
        cursor(input)
            .parse_type_list()
            .map(|ts| ts.into_iter().map(|t| t.node).collect())
    }

    #[test]
    fn test_simple_type() {
        let ty = cursor("number").parse_type().unwrap();
        assert_eq!(ty.node, Type::primitive(Primitive::Number));
        assert_eq!(ty.span, Span::new(0, 6));
    }

    #[test]
    fn test_nested_array_type() {
        let ty = cursor("[[a]]").parse_type().unwrap();
        assert_eq!(ty.node, Type::new(BaseType::Var("a".into()), 2));
        assert_eq!(ty.span, Span::new(0, 5));
    }

    #[test]
    fn test_type_list() {
        let types = parse_list("a -> [string] -> a").unwrap();
        assert_eq!(
            types,
            vec![
                Type::var("a"),
                Type::primitive(Primitive::String).array_of(),
                Type::var("a"),
            ]
        );
    }

    #[test]
    fn test_unit_is_dropped() {
        let types = parse_list("() -> [[number]]").unwrap();
        assert_eq!(types, vec![Type::new(BaseType::Primitive(Primitive::Number), 2)]);
    }

    #[test]
    fn test_unit_after_first_segment() {
        assert!(matches!(
            parse_list("a -> () -> b"),
            Err(SignatureError::MisplacedUnit { .. })
        ));
    }

    #[test]
    fn test_single_type_is_too_few() {
        assert!(matches!(
            parse_list("a"),
            Err(SignatureError::TooFewTypes { found: 1, .. })
        ));
        assert!(matches!(
            parse_list("()"),
            Err(SignatureError::TooFewTypes { found: 1, .. })
        ));
    }

    #[test]
    fn test_unclosed_bracket() {
        assert!(matches!(
            parse_list("[[a] -> b"),
            Err(SignatureError::MalformedBrackets { .. })
        ));
    }

    #[test]
    fn test_brackets_around_and_after() {
        for input in ["[[a]a] -> b", "[a[a]] -> b", "a[[a]] -> b", "a] -> b"] {
            assert!(
                matches!(parse_list(input), Err(SignatureError::MalformedBrackets { .. })),
                "expected bracket error for {}",
                input
            );
        }
    }

    #[test]
    fn test_space_inside_type_name() {
        assert!(matches!(
            parse_list("num ber -> a"),
            Err(SignatureError::UnexpectedToken { .. })
        ));
    }
}
