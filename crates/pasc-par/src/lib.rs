//! pasc-par - the Pascal parser.
//!
//! A recursive-descent parser that drains a [`pasc_lex::Lexer`] into a
//! buffered token sequence and builds an [`ast::Node`] tree from it. Each
//! grammar layer gets its own module (`expr`, `types`, `stmt`, `items`);
//! this module owns the shared [`Parser`] cursor and its four primitives:
//! `peek`, `peek_far`, `take`, `expect`.
//!
//! There is no error recovery. The first [`ParseError`] aborts the whole
//! parse; callers get one message and the offending token's position.

pub mod ast;
pub mod error;
pub mod expr;
pub mod items;
mod spine;
pub mod stmt;
pub mod types;

use pasc_lex::{Lexer, Token, TokenKind};

pub use ast::Node;
pub use error::{ParseError, ParseResult};

/// Buffers tokens from a [`Lexer`] and exposes lookahead/consume
/// primitives to the grammar modules.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            pos: 0,
        }
    }

    /// Drains `lexer` into the token buffer, stopping on (and including)
    /// `EOF`.
    pub fn load(&mut self, lexer: &mut Lexer<'_>) {
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            self.tokens.push(token);
            if is_eof {
                break;
            }
        }
    }

    /// Convenience constructor: scans and loads `source` in one step.
    pub fn from_source(source: &[u8]) -> Self {
        let mut parser = Self::new();
        let mut lexer = Lexer::new(source);
        parser.load(&mut lexer);
        parser
    }

    /// The token at the current position, without advancing. Past the end
    /// of the buffer this is the trailing `EOF`.
    pub fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| self.tokens.last().expect("parser loaded with no tokens"))
    }

    /// The token `k` positions ahead of the current one.
    pub fn peek_far(&self, k: usize) -> ParseResult<&Token> {
        self.tokens
            .get(self.pos + k)
            .ok_or_else(|| ParseError::new("unexpected end of input", self.peek().clone()))
    }

    /// Returns the current token and advances past it. Never advances
    /// past the trailing `EOF`.
    pub fn take(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// [`Parser::take`], but fails if the current token is not `kind`.
    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.peek().kind == kind {
            Ok(self.take())
        } else {
            Err(self.error(format!("expected {kind:?}, found {}", self.peek().describe())))
        }
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token if it is `kind`, reporting whether it did.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.take();
            true
        } else {
            false
        }
    }

    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.peek().clone())
    }

    /// Top-level entry point: a whole `program ... .` source file.
    pub fn parse_program(&mut self) -> ParseResult<Node> {
        items::parse_program(self)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
