//! String literal scanning.
//!
//! A Pascal string token is a run of segments: `'...'` quoted runs and
//! `#n` control-code runs, concatenated freely (`'abc'#13#10'def'`). The
//! token ends as soon as neither segment type starts at the cursor. No
//! doubled-quote escaping is handled — the spec excludes it from the
//! test surface.

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a> Lexer<'a> {
    pub(crate) fn scan_string(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();

        loop {
            match self.cursor.current() {
                b'\'' => {
                    self.cursor.advance(); // opening quote
                    while !self.cursor.is_at_end() && self.cursor.current() != b'\'' {
                        self.cursor.advance();
                    }
                    if !self.cursor.is_at_end() {
                        self.cursor.advance(); // closing quote
                    }
                }
                b'#' => {
                    self.cursor.advance();
                    while self.cursor.current().is_ascii_digit() {
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }

        let text = std::str::from_utf8(self.cursor.slice(start))
            .expect("string bytes are ASCII")
            .to_string();
        Token::new(TokenKind::String, Some(text), line, column)
    }
}
