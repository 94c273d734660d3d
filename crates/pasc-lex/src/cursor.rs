//! Byte cursor for traversing source code.
//!
//! The scanner operates directly on a slice of input bytes (the legacy
//! circular buffer from the original implementation is out of scope).
//! `Cursor` tracks a byte position plus 1-based line/column, and exposes
//! the lookahead primitives the lexer submodules need.

/// A cursor over an in-memory byte buffer.
///
/// ASCII content is assumed throughout; the spec places Unicode
/// identifiers and arbitrary multi-byte source text out of scope, so the
/// cursor indexes by byte rather than by `char`.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `bytes`, skipping a leading UTF-8 BOM
    /// (`EF BB BF`) if present.
    pub fn new(bytes: &'a [u8]) -> Self {
        let mut cursor = Self {
            bytes,
            position: 0,
            line: 1,
            column: 1,
        };
        const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
        if bytes.starts_with(&BOM) {
            cursor.position = BOM.len();
        }
        cursor
    }

    /// Byte at `position + offset`, or `\0` past the end of the buffer.
    #[inline]
    pub fn peek(&self, offset: usize) -> u8 {
        self.bytes.get(self.position + offset).copied().unwrap_or(0)
    }

    /// The byte under the cursor.
    #[inline]
    pub fn current(&self) -> u8 {
        self.peek(0)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Consumes and returns the current byte, updating line/column.
    ///
    /// A newline resets the column to 0, so the byte that follows it
    /// becomes column 1.
    pub fn advance(&mut self) -> u8 {
        let b = self.current();
        if !self.is_at_end() {
            self.position += 1;
            if b == b'\n' {
                self.line += 1;
                self.column = 0;
            }
            self.column += 1;
        }
        b
    }

    /// Returns the raw bytes between `start` and the current position.
    pub fn slice(&self, start: usize) -> &'a [u8] {
        &self.bytes[start..self.position]
    }
}
