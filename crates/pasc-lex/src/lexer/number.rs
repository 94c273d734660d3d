//! Numeric literal scanning.
//!
//! A three-stage state machine: integer digits, an optional fraction
//! (only consumed when a digit follows the `.`), and an optional
//! exponent (only consumed when a digit follows `e`/`E`, possibly through
//! a sign). Each stage backs off rather than consuming a byte that
//! belongs to the next token — this is what makes `1..10` scan as
//! `DIGIT("1") DOTDOT DIGIT("10")` and `1.e5` scan as
//! `DIGIT("1") DOT IDENTIFIER("e5")`.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn scan_number(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();

        // Stage 0: integer part.
        while self.cursor.current().is_ascii_digit() {
            self.cursor.advance();
        }

        // Stage 1: fraction, only if a digit actually follows the dot.
        if self.cursor.current() == b'.' && self.cursor.peek(1).is_ascii_digit() {
            self.cursor.advance(); // '.'
            while self.cursor.current().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        // Stage 2: exponent.
        if matches!(self.cursor.current(), b'e' | b'E') {
            let sign_offset = if matches!(self.cursor.peek(1), b'+' | b'-') {
                2
            } else {
                1
            };
            if self.cursor.peek(sign_offset).is_ascii_digit() {
                for _ in 0..sign_offset {
                    self.cursor.advance();
                }
                while self.cursor.current().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
            // Otherwise the 'e' is left for the next token (an identifier).
        }

        let text = std::str::from_utf8(self.cursor.slice(start))
            .expect("numeric bytes are ASCII")
            .to_string();
        Token::new(TokenKind::Digit, Some(text), line, column)
    }
}
