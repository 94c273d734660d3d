//! Whitespace and comment skipping.
//!
//! Pascal accepts three comment styles: brace comments `{ ... }`,
//! parenthesis-star comments `(* ... *)`, and line comments `// ...`.
//! A stray `*` inside a `(* *)` comment does not close it; only the
//! two-byte sequence `*)` does.

use super::core::Lexer;

impl<'a> Lexer<'a> {
    /// Repeatedly skips ASCII whitespace and any of the three comment
    /// styles until neither applies, leaving the cursor at the start of
    /// the next token (or at end of buffer).
    pub(crate) fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.cursor.advance();
                }
                b'{' => {
                    self.skip_brace_comment();
                }
                b'(' if self.cursor.peek(1) == b'*' => {
                    self.skip_paren_star_comment();
                }
                b'/' if self.cursor.peek(1) == b'/' => {
                    self.skip_line_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_brace_comment(&mut self) {
        self.cursor.advance(); // '{'
        while !self.cursor.is_at_end() && self.cursor.current() != b'}' {
            self.cursor.advance();
        }
        if !self.cursor.is_at_end() {
            self.cursor.advance(); // '}'
        }
    }

    fn skip_paren_star_comment(&mut self) {
        self.cursor.advance(); // '('
        self.cursor.advance(); // '*'
        while !self.cursor.is_at_end() {
            if self.cursor.current() == b'*' && self.cursor.peek(1) == b')' {
                self.cursor.advance();
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        self.cursor.advance(); // '/'
        self.cursor.advance(); // '/'
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
        // The newline itself is left for the whitespace branch to consume,
        // which also keeps line tracking in one place.
    }
}
