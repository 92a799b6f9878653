//! Tokenizer for the Python subset
//!
//! Converts source text into a flat [`Token`] stream consumed by the parser.
//! Indentation is resolved here: each logical line is preceded by `Indent`/
//! `Dedent` tokens synthesized from an indent stack, so the parser never
//! sees raw leading whitespace. Newlines inside parentheses are suppressed
//! (implicit line joining); blank and comment-only lines produce no tokens.

use crate::ast::Span;
use crate::error::OpflipError;
use crate::OpflipResult;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals and names
    Name(String),
    Number(String),
    Str(String),

    // Keywords
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Not,
    And,
    Or,
    Is,
    Pass,
    Return,
    Break,
    Continue,
    True,
    False,
    None,

    // Comparison operators
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    DoubleStar,

    // Punctuation
    Assign,
    Comma,
    Colon,
    LParen,
    RParen,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Name(s) => write!(f, "identifier '{}'", s),
            TokenKind::Number(s) => write!(f, "number {}", s),
            TokenKind::Str(s) => write!(f, "string literal {}", s),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Elif => write!(f, "'elif'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::For => write!(f, "'for'"),
            TokenKind::In => write!(f, "'in'"),
            TokenKind::Not => write!(f, "'not'"),
            TokenKind::And => write!(f, "'and'"),
            TokenKind::Or => write!(f, "'or'"),
            TokenKind::Is => write!(f, "'is'"),
            TokenKind::Pass => write!(f, "'pass'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Break => write!(f, "'break'"),
            TokenKind::Continue => write!(f, "'continue'"),
            TokenKind::True => write!(f, "'True'"),
            TokenKind::False => write!(f, "'False'"),
            TokenKind::None => write!(f, "'None'"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::DoubleSlash => write!(f, "'//'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::DoubleStar => write!(f, "'**'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Newline => write!(f, "end of line"),
            TokenKind::Indent => write!(f, "indent"),
            TokenKind::Dedent => write!(f, "dedent"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenizes `source`, ending the stream with `Dedent`s back to column zero
/// followed by a single `Eof` token.
pub fn tokenize(source: &str) -> OpflipResult<Vec<Token>> {
    Lexer::new(source).run()
}

/// Tab stops are every 8 columns when measuring indentation, as in CPython.
const TAB_STOP: usize = 8;

struct Lexer<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    line: usize,
    col: usize,
    paren_depth: usize,
    indents: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().collect(),
            pos: 0,
            line: 1,
            col: 0,
            paren_depth: 0,
            indents: vec![0],
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).map(|&(_, c)| c)
    }

    fn byte_at(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map(|&(b, _)| b)
            .unwrap_or(self.src.len())
    }

    fn advance(&mut self) {
        if let Some(&(_, c)) = self.chars.get(self.pos) {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    /// Snapshot of the current location, for building token spans.
    fn here(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.col)
    }

    fn span_from(&self, mark: (usize, usize, usize)) -> Span {
        let (pos, line, col) = mark;
        Span {
            start: self.byte_at(pos),
            end: self.byte_at(self.pos),
            line,
            col,
        }
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token { kind, span });
    }

    fn run(mut self) -> OpflipResult<Vec<Token>> {
        while self.pos < self.chars.len() {
            let width = self.measure_indent();
            match self.peek() {
                Option::None => break,
                Some('\n') => {
                    self.advance();
                    continue;
                }
                Some('\r') => {
                    self.advance();
                    continue;
                }
                Some('#') => {
                    self.skip_comment();
                    if self.peek() == Some('\n') {
                        self.advance();
                    }
                    continue;
                }
                Some(_) => {}
            }
            self.apply_indent(width)?;
            self.lex_logical_line()?;
        }

        let eof = self.span_from(self.here());
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, eof.clone());
        }
        self.push(TokenKind::Eof, eof);
        Ok(self.tokens)
    }

    /// Consumes leading whitespace on a physical line and returns its width.
    fn measure_indent(&mut self) -> usize {
        let mut width = 0;
        while let Some(c) = self.peek() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / TAB_STOP + 1) * TAB_STOP,
                _ => break,
            }
            self.advance();
        }
        width
    }

    fn apply_indent(&mut self, width: usize) -> OpflipResult<()> {
        let span = self.span_from(self.here());
        let current = *self.indents.last().unwrap_or(&0);
        if width > current {
            self.indents.push(width);
            self.push(TokenKind::Indent, span);
            return Ok(());
        }
        while width < *self.indents.last().unwrap_or(&0) {
            self.indents.pop();
            self.push(TokenKind::Dedent, span.clone());
        }
        if width != *self.indents.last().unwrap_or(&0) {
            return Err(OpflipError::parse(
                "unindent does not match any outer indentation level",
                span,
            ));
        }
        Ok(())
    }

    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Lexes one logical line, up to and including its terminating newline.
    /// Newlines inside parentheses are joined; at end of input a `Newline`
    /// token is synthesized so every statement ends the same way.
    fn lex_logical_line(&mut self) -> OpflipResult<()> {
        loop {
            let mark = self.here();
            let c = match self.peek() {
                Some(c) => c,
                Option::None => {
                    self.push(TokenKind::Newline, self.span_from(mark));
                    return Ok(());
                }
            };
            match c {
                ' ' | '\t' | '\r' => self.advance(),
                '#' => self.skip_comment(),
                '\n' => {
                    if self.paren_depth > 0 {
                        self.advance();
                    } else {
                        self.advance();
                        self.push(TokenKind::Newline, self.span_from(mark));
                        return Ok(());
                    }
                }
                _ if c.is_alphabetic() || c == '_' => self.lex_name(),
                _ if c.is_ascii_digit() => self.lex_number(),
                '"' | '\'' => self.lex_string()?,
                _ => self.lex_operator()?,
            }
        }
    }

    fn lex_name(&mut self) {
        let mark = self.here();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let span = self.span_from(mark);
        let text = &self.src[span.start..span.end];
        let kind = match text {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "not" => TokenKind::Not,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "is" => TokenKind::Is,
            "pass" => TokenKind::Pass,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::None,
            _ => TokenKind::Name(text.to_string()),
        };
        self.push(kind, span);
    }

    fn lex_number(&mut self) {
        let mark = self.here();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let follows_exponent = match self.peek_next() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => true,
                _ => false,
            };
            if follows_exponent {
                self.advance();
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.advance();
                }
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        let span = self.span_from(mark);
        let text = self.src[span.start..span.end].to_string();
        self.push(TokenKind::Number(text), span);
    }

    fn lex_string(&mut self) -> OpflipResult<()> {
        let mark = self.here();
        let quote = self.peek().unwrap_or('"');
        self.advance();
        loop {
            match self.peek() {
                Option::None | Some('\n') => {
                    return Err(OpflipError::parse(
                        "unterminated string literal",
                        self.span_from(mark),
                    ));
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }
        let span = self.span_from(mark);
        let text = self.src[span.start..span.end].to_string();
        self.push(TokenKind::Str(text), span);
        Ok(())
    }

    fn lex_operator(&mut self) -> OpflipResult<()> {
        let mark = self.here();
        let c = self.peek().unwrap_or('\0');
        let next = self.peek_next();
        let (kind, len) = match (c, next) {
            ('<', Some('=')) => (TokenKind::Le, 2),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', Some('=')) => (TokenKind::Ge, 2),
            ('>', _) => (TokenKind::Gt, 1),
            ('=', Some('=')) => (TokenKind::EqEq, 2),
            ('=', _) => (TokenKind::Assign, 1),
            ('!', Some('=')) => (TokenKind::NotEq, 2),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', Some('*')) => (TokenKind::DoubleStar, 2),
            ('*', _) => (TokenKind::Star, 1),
            ('/', Some('/')) => (TokenKind::DoubleSlash, 2),
            ('/', _) => (TokenKind::Slash, 1),
            ('%', _) => (TokenKind::Percent, 1),
            (',', _) => (TokenKind::Comma, 1),
            (':', _) => (TokenKind::Colon, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            _ => {
                self.advance();
                return Err(OpflipError::parse(
                    format!("unexpected character '{}'", c),
                    self.span_from(mark),
                ));
            }
        };
        match kind {
            TokenKind::LParen => self.paren_depth += 1,
            TokenKind::RParen => self.paren_depth = self.paren_depth.saturating_sub(1),
            _ => {}
        }
        for _ in 0..len {
            self.advance();
        }
        let span = self.span_from(mark);
        self.push(kind, span);
        Ok(())
    }
}
