//! Punctuation scanning, including the two-character lookahead forms
//! `:=`, `..`, `>=`, `<=`, `<>`.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn scan_operator(&mut self, line: u32, column: u32) -> Token {
        let first = self.cursor.current();
        let second = self.cursor.peek(1);

        let kind = match (first, second) {
            (b':', b'=') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::Assign
            }
            (b'.', b'.') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::DotDot
            }
            (b'>', b'=') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::GreaterEq
            }
            (b'<', b'=') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::LessEq
            }
            (b'<', b'>') => {
                self.cursor.advance();
                self.cursor.advance();
                TokenKind::Neq
            }
            (b':', _) => {
                self.cursor.advance();
                TokenKind::Colon
            }
            (b'.', _) => {
                self.cursor.advance();
                TokenKind::Dot
            }
            (b'>', _) => {
                self.cursor.advance();
                TokenKind::Greater
            }
            (b'<', _) => {
                self.cursor.advance();
                TokenKind::Less
            }
            (b'=', _) => {
                self.cursor.advance();
                TokenKind::Equal
            }
            _ => unreachable!("scan_operator called on non-operator byte"),
        };

        Token::new(kind, None, line, column)
    }
}
