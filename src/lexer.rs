//! Handwritten lexer for the type-list half of a signature

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::ast::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Type name or type variable
    Ident(String),

    LBracket, // [
    RBracket, // ]
    Arrow,    // ->
    Unit,     // ()

    Eof,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(name) => format!("`{}`", name),
            Token::LBracket => "`[`".to_string(),
            Token::RBracket => "`]`".to_string(),
            Token::Arrow => "`->`".to_string(),
            Token::Unit => "`()`".to_string(),
            Token::Eof => "end of signature".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char, Span),
    /// A `-` or `>` that is not part of `->`
    #[error("malformed arrow")]
    MalformedArrow(Span),
    /// A `(` or `)` that is not part of `()`
    #[error("malformed unit `()`")]
    MalformedUnit(Span),
}

impl LexError {
    pub fn span(&self) -> &Span {
        match self {
            LexError::UnexpectedChar(_, span) => span,
            LexError::MalformedArrow(span) => span,
            LexError::MalformedUnit(span) => span,
        }
    }
}

pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    pos: usize,
    /// Added to every span so tokens point into the whole signature
    offset: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            pos: 0,
            offset: 0,
        }
    }

    /// Lex a slice that starts `offset` bytes into the full signature
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn tokenize(mut self) -> Result<Vec<SpannedToken>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eof = tok.token == Token::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn span(&self, start: usize) -> Span {
        Span::new(start + self.offset, self.pos + self.offset)
    }

    fn next_token(&mut self) -> Result<SpannedToken, LexError> {
        self.skip_whitespace();

        let start = self.pos;
        let Some(c) = self.advance() else {
            return Ok(SpannedToken {
                token: Token::Eof,
                span: self.span(start),
            });
        };

        let token = match c {
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '-' => {
                if self.peek() == Some('>') {
                    self.advance();
                    Token::Arrow
                } else {
                    return Err(LexError::MalformedArrow(self.span(start)));
                }
            }
            '>' => return Err(LexError::MalformedArrow(self.span(start))),
            '(' => {
                self.skip_whitespace();
                if self.peek() == Some(')') {
                    self.advance();
                    Token::Unit
                } else {
                    return Err(LexError::MalformedUnit(self.span(start)));
                }
            }
            ')' => return Err(LexError::MalformedUnit(self.span(start))),
            c if is_ident_char(c) => self.lex_ident(c),
            c => return Err(LexError::UnexpectedChar(c, self.span(start))),
        };

        Ok(SpannedToken {
            token,
            span: self.span(start),
        })
    }

    fn lex_ident(&mut self, first: char) -> Token {
        let mut name = String::from(first);
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Token::Ident(name)
    }
}
