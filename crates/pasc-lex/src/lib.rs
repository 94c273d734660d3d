//! pasc-lex - the Pascal scanner.
//!
//! Consumes a UTF-8 byte buffer (optionally BOM-prefixed) and yields a
//! stream of [`Token`]s, skipping ASCII whitespace and the three comment
//! styles Pascal accepts: `{ ... }`, `(* ... *)`, and `// ...`.
//!
//! The scanner has no recoverable error mode. Malformed input either
//! yields an unexpected `EOF` or a token whose kind the parser did not
//! expect; diagnosing that is the parser's job.
//!
//! ```
//! use pasc_lex::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new(b"x := 1 + 2");
//! assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
//! assert_eq!(lexer.next_token().kind, TokenKind::Assign);
//! ```

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{keyword_from_str, Token, TokenKind};
