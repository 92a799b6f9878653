//! Recursive-descent parser for the Python subset
//!
//! [`parse`] is the boundary contract: source text in, [`Module`] out, or a
//! parse failure with location information. Statement and expression
//! grammars live in their own modules; this one owns the token cursor.

use crate::ast::{Module, Span};
use crate::error::OpflipError;
use crate::OpflipResult;
use lexer::{Token, TokenKind};

pub mod expressions;
pub mod lexer;
pub mod statements;

/// Parses a source snippet into a [`Module`].
pub fn parse(source: &str) -> OpflipResult<Module> {
    let tokens = lexer::tokenize(source)?;
    let mut parser = Parser::new(tokens);
    let mut body = Vec::new();
    loop {
        match parser.peek().kind {
            TokenKind::Eof => break,
            TokenKind::Newline => {
                parser.bump();
            }
            _ => body.push(statements::parse_statement(&mut parser)?),
        }
    }
    Ok(Module { body })
}

/// Token cursor shared by the statement and expression parsers.
///
/// The token stream always ends with `Eof`, and `bump` refuses to move past
/// it, so `peek` is total.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn bump(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    /// Consumes the next token if it has exactly this kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> OpflipResult<Token> {
        if self.peek().kind == kind {
            Ok(self.bump())
        } else {
            Err(self.error_here(format!("expected {}, found {}", what, self.peek().kind)))
        }
    }

    /// Byte offset just past the most recently consumed token, for spans.
    pub(crate) fn prev_end(&self) -> usize {
        self.tokens[self.pos.saturating_sub(1)].span.end
    }

    pub(crate) fn error_here(&self, message: String) -> OpflipError {
        OpflipError::parse(message, self.peek().span.clone())
    }

    pub(crate) fn error_at(&self, message: String, span: Span) -> OpflipError {
        OpflipError::parse(message, span)
    }
}
