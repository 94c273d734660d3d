//! pasc-util - Core Utilities and Foundation Types
//!
//! Fundamental utilities shared by the scanner and parser crates: interned
//! identifiers, source spans, diagnostic reporting, typed index vectors and
//! the error types for each.
//!
//! None of this is Pascal-specific; it is the same foundation layer every
//! downstream compiler phase is built on, so it is kept free of any
//! knowledge of tokens, grammar rules or AST shapes.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, Span};
pub use symbol::Symbol;

pub use rustc_hash::{FxHashMap, FxHashSet};
