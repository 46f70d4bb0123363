//! Token stream cursor with lookahead and span tracking

use crate::ast::Span;
use crate::lexer::{SpannedToken, Token};

use super::error::SignatureError;

/// Token stream cursor providing lookahead and span tracking
pub struct TokenCursor {
    tokens: Vec<SpannedToken>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    // ========================================================================
    // Position and lookahead
    // ========================================================================

    /// Get the current token without consuming it
    pub fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    /// Get the span of the current token
    pub fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.span.clone())
            .unwrap_or_default()
    }

    /// Span of the most recently consumed token
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span.clone())
            .unwrap_or_else(|| self.current_span())
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    // ========================================================================
    // Token consumption
    // ========================================================================

    /// Advance to the next token and return the span of the consumed one
    pub fn advance(&mut self) -> Span {
        let span = self.current_span();
        if !self.is_at_end() {
            self.pos += 1;
        }
        span
    }

    pub fn check(&self, token: &Token) -> bool {
        self.peek() == token
    }

    /// If the current token matches, consume it and return true
    pub fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Create an error for unexpected token at current position
    pub fn unexpected(&self, expected: &str) -> SignatureError {
        SignatureError::unexpected(expected, self.peek(), self.current_span())
    }
}
