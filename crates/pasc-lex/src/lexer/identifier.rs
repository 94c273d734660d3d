//! Identifier and keyword scanning.

use super::core::Lexer;
use crate::token::{keyword_from_str, Token, TokenKind};

impl<'a> Lexer<'a> {
    /// Scans `[A-Za-z_][A-Za-z0-9_]*`, then case-folds a copy to ASCII
    /// lowercase to check the keyword table. A hit yields a keyword token
    /// with no meta; a miss yields `IDENTIFIER` with the original,
    /// case-preserving text as meta.
    pub(crate) fn scan_identifier(&mut self, line: u32, column: u32) -> Token {
        let start = self.cursor.position();
        while matches!(self.cursor.current(), b'_' | b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9') {
            self.cursor.advance();
        }
        let text = std::str::from_utf8(self.cursor.slice(start))
            .expect("identifier bytes are ASCII")
            .to_string();
        let lower = text.to_ascii_lowercase();
        match keyword_from_str(&lower) {
            Some(kind) => Token::new(kind, None, line, column),
            None => Token::new(TokenKind::Identifier, Some(text), line, column),
        }
    }
}
