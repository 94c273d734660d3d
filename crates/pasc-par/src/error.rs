//! The parser's only error type.
//!
//! There is no recovery and no warning level: a [`ParseError`] carries the
//! offending token and aborts the whole parse. Formatting it as
//! `Error: <message>. <tokenkind>(<meta>)\n Line: L, Col: C` is the
//! driver's job, not the parser's - this type only needs to carry enough
//! to let a caller build that message.

use pasc_lex::Token;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub token: Token,
}

impl ParseError {
    pub fn new(message: impl Into<String>, token: Token) -> Self {
        Self {
            message: message.into(),
            token,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
